//! Fuzz target for pod evaluation.
//!
//! Goal: evaluating any pod that deserializes must **never panic**, and every
//! result must be allowed iff it carries no reasons, details or field errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_evaluate_pod
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use podguard::{CheckOptions, Level, LevelVersion, Version, evaluate_pod_json};

#[derive(Arbitrary, Debug)]
struct EvalInput {
    /// Raw pod manifest JSON.
    pod_json: String,
    level: u8,
    /// `None` evaluates at `latest`.
    minor: Option<u8>,
    with_field_errors: bool,
    relax_for_user_namespace_pods: bool,
}

fuzz_target!(|input: EvalInput| {
    // Limit input size to keep fuzzing fast
    if input.pod_json.len() > 16 * 1024 {
        return;
    }

    let level = match input.level % 3 {
        0 => Level::Privileged,
        1 => Level::Baseline,
        _ => Level::Restricted,
    };
    let version = input
        .minor
        .map_or(Version::Latest, |minor| Version::new(1, u32::from(minor)));
    let opts = CheckOptions {
        with_field_errors: input.with_field_errors,
        relax_for_user_namespace_pods: input.relax_for_user_namespace_pods,
    };

    // Invalid JSON is fine; only evaluation must hold up.
    let Ok(result) = evaluate_pod_json(&input.pod_json, LevelVersion::new(level, version), &opts)
    else {
        return;
    };

    let empty = result.forbidden_reasons.is_empty()
        && result.forbidden_details.is_empty()
        && result.field_errors.is_none();
    assert_eq!(result.allowed, empty);
    if level == Level::Privileged {
        assert!(result.allowed);
    }
});
