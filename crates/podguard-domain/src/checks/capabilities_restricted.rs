use crate::checks::utils::join_quote;
use crate::checks::violations::{Violations, ViolationKind};
use crate::checks::visit::visit_containers;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

const CAPABILITY_ALL: &str = "ALL";
const CAPABILITY_NET_BIND_SERVICE: &str = "NET_BIND_SERVICE";

pub fn check() -> Check {
    Check {
        id: ids::CHECK_CAPABILITIES_RESTRICTED,
        level: Level::Restricted,
        versions: vec![
            VersionedCheck::new(Version::new(1, 22), capabilities_restricted_v1_22),
            VersionedCheck::new(Version::new(1, 25), capabilities_restricted_v1_25),
        ],
    }
}

/// Containers must drop `ALL` and may only add back `NET_BIND_SERVICE`.
pub fn capabilities_restricted_v1_22(
    _: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    let mut violations = Violations::new();
    for (scope, container) in visit_containers(spec) {
        let caps_field = scope.security_context_field("capabilities");
        let caps = container
            .security_context
            .as_ref()
            .and_then(|sc| sc.capabilities.as_ref());
        let drops_all = caps.is_some_and(|c| c.drop.iter().any(|d| d == CAPABILITY_ALL));
        if !drops_all {
            violations.require(scope, caps_field.child("drop"));
        }
        let Some(caps) = caps else { continue };
        for (i, cap) in caps.add.iter().enumerate() {
            if cap != CAPABILITY_NET_BIND_SERVICE {
                violations.forbid(scope, caps_field.child("add").index(i), cap.as_str());
            }
        }
    }
    // The drop requirement reads first for this rule.
    let order = [ViolationKind::Required, ViolationKind::Forbidden];
    let detail = violations.compose_in(&order, |group| match group.kind {
        ViolationKind::Required => format!(
            r#"{} must set securityContext.capabilities.drop=["ALL"]"#,
            group.subjects
        ),
        ViolationKind::Forbidden => format!(
            "{} must not include {} in securityContext.capabilities.add",
            group.subjects,
            join_quote(group.values())
        ),
    });
    violations.into_result(ids::REASON_UNRESTRICTED_CAPABILITIES, detail, opts)
}

/// As v1.22, but Windows pods are exempt.
pub fn capabilities_restricted_v1_25(
    metadata: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    if spec.is_windows() {
        return CheckResult::allowed();
    }
    capabilities_restricted_v1_22(metadata, spec, opts)
}
