use crate::checks::utils::join_quote;
use crate::checks::violations::Violations;
use crate::checks::visit::visit_containers;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

/// Capabilities container runtimes grant by default.
const DEFAULT_CAPABILITIES: &[&str] = &[
    "AUDIT_WRITE",
    "CHOWN",
    "DAC_OVERRIDE",
    "FOWNER",
    "FSETID",
    "KILL",
    "MKNOD",
    "NET_BIND_SERVICE",
    "SETFCAP",
    "SETGID",
    "SETPCAP",
    "SETUID",
    "SYS_CHROOT",
];

pub fn check() -> Check {
    Check {
        id: ids::CHECK_CAPABILITIES_BASELINE,
        level: Level::Baseline,
        versions: vec![VersionedCheck::new(Version::new(1, 0), capabilities_baseline_v1_0)],
    }
}

/// Containers may only add capabilities from the default set.
pub fn capabilities_baseline_v1_0(
    _: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    let mut violations = Violations::new();
    for (scope, container) in visit_containers(spec) {
        let Some(caps) = container
            .security_context
            .as_ref()
            .and_then(|sc| sc.capabilities.as_ref())
        else {
            continue;
        };
        for (i, cap) in caps.add.iter().enumerate() {
            if DEFAULT_CAPABILITIES.contains(&cap.as_str()) {
                continue;
            }
            let field = scope
                .security_context_field("capabilities")
                .child("add")
                .index(i);
            violations.forbid(scope, field, cap.as_str());
        }
    }
    let detail = violations.compose(|group| {
        format!(
            "{} must not include {} in securityContext.capabilities.add",
            group.subjects,
            join_quote(group.values())
        )
    });
    violations.into_result(ids::REASON_NON_DEFAULT_CAPABILITIES, detail, opts)
}
