use crate::checks::violations::Violations;
use crate::checks::visit::resolve;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_PRIVILEGED,
        level: Level::Baseline,
        versions: vec![VersionedCheck::new(Version::new(1, 0), privileged_v1_0)],
    }
}

/// Containers must not set `securityContext.privileged=true`.
pub fn privileged_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    let mut violations = Violations::new();
    // The pod level has no privileged field.
    for resolved in resolve(spec, |_| None, |sc| sc.privileged) {
        if resolved.value == Some(true) {
            let scope = resolved.scope;
            violations.forbid(scope, scope.security_context_field("privileged"), true);
        }
    }
    let detail = violations.compose(|group| {
        format!(
            "{} must not set securityContext.privileged=true",
            group.subjects
        )
    });
    violations.into_result(ids::REASON_PRIVILEGED, detail, opts)
}
