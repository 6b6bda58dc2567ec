//! Fuzz target for `podguard.toml` parsing and resolution.
//!
//! Goal: parsing and resolving should **never panic** on any input.
//! Malformed documents must come back as errors.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use podguard_settings::{Overrides, parse_config_toml, resolve_config};

fuzz_target!(|data: &[u8]| {
    // Limit input size to avoid OOM and keep fuzzing fast
    if data.len() > 64 * 1024 {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Should never panic - errors are fine
    if let Ok(cfg) = parse_config_toml(input) {
        let _ = resolve_config(cfg, Overrides::default());
    }
});
