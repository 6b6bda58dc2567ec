//! Pod security evaluation against the `privileged`, `baseline` and
//! `restricted` levels.
//!
//! ```
//! use podguard::{CheckOptions, Level, LevelVersion, Pod, Version, evaluate_pod};
//!
//! let pod: Pod = serde_json::from_str(
//!     r#"{"spec": {"containers": [{"name": "app", "securityContext": {"privileged": true}}]}}"#,
//! )
//! .unwrap();
//! let result = evaluate_pod(
//!     &pod,
//!     LevelVersion::new(Level::Baseline, Version::Latest),
//!     &CheckOptions::default(),
//! );
//! assert!(!result.allowed);
//! assert_eq!(result.forbidden_reason(), "privileged");
//! ```

#![forbid(unsafe_code)]

use std::sync::OnceLock;

pub use podguard_domain::checks::default_checks;
pub use podguard_domain::evaluate;
pub use podguard_domain::model::{Pod, PodMetadata, PodSpec};
pub use podguard_domain::policy::CheckOptions;
pub use podguard_domain::registry::{
    Check, CheckRegistry, PodCheck, RegistryError, ResolvedCheck, VersionedCheck,
};
pub use podguard_types::{
    AggregateCheckResult, CheckResult, ErrorType, Explanation, FieldError, FieldPath, Level,
    LevelVersion, Version, ids, lookup_explanation,
};

/// The built-in checks, validated once per process.
pub fn default_registry() -> &'static CheckRegistry {
    static REGISTRY: OnceLock<CheckRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        CheckRegistry::new(default_checks()).expect("built-in check registry must be valid")
    })
}

/// Evaluate one pod with the built-in checks.
pub fn evaluate_pod(
    pod: &Pod,
    level_version: LevelVersion,
    opts: &CheckOptions,
) -> AggregateCheckResult {
    evaluate(
        default_registry(),
        level_version,
        &pod.metadata,
        &pod.spec,
        opts,
    )
}

/// Parse a pod manifest from JSON and evaluate it.
pub fn evaluate_pod_json(
    json: &str,
    level_version: LevelVersion,
    opts: &CheckOptions,
) -> Result<AggregateCheckResult, serde_json::Error> {
    let pod: Pod = serde_json::from_str(json)?;
    tracing::trace!(pod = %pod.metadata.name, "parsed pod manifest");
    Ok(evaluate_pod(&pod, level_version, opts))
}
