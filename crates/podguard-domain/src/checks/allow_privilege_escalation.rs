use crate::checks::violations::Violations;
use crate::checks::visit::resolve;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_ALLOW_PRIVILEGE_ESCALATION,
        level: Level::Restricted,
        versions: vec![
            VersionedCheck::new(Version::new(1, 8), allow_privilege_escalation_v1_8),
            VersionedCheck::new(Version::new(1, 25), allow_privilege_escalation_v1_25),
        ],
    }
}

/// Every container must explicitly set `allowPrivilegeEscalation=false`.
pub fn allow_privilege_escalation_v1_8(
    _: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    let mut violations = Violations::new();
    let resolved = resolve(spec, |_| None, |sc| sc.allow_privilege_escalation);
    // Container-only field: skip the pod scope.
    for r in resolved.into_iter().skip(1) {
        let field = r.scope.security_context_field("allowPrivilegeEscalation");
        match r.value {
            Some(false) => {}
            Some(true) => violations.forbid(r.scope, field, true),
            None => violations.require(r.scope, field),
        }
    }
    // Unset and explicit true share one remediation sentence.
    let subjects = violations.subjects();
    let detail = format!(
        "{subjects} must set securityContext.allowPrivilegeEscalation=false"
    );
    violations.into_result(ids::REASON_ALLOW_PRIVILEGE_ESCALATION, detail, opts)
}

/// As v1.8, but Windows pods are exempt.
pub fn allow_privilege_escalation_v1_25(
    metadata: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    if spec.is_windows() {
        return CheckResult::allowed();
    }
    allow_privilege_escalation_v1_8(metadata, spec, opts)
}
