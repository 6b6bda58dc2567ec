use crate::checks::violations::Violations;
use crate::checks::visit::Scope;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_HOST_NAMESPACES,
        level: Level::Baseline,
        versions: vec![VersionedCheck::new(Version::new(1, 0), host_namespaces_v1_0)],
    }
}

/// The pod must not share the host network, PID or IPC namespace.
pub fn host_namespaces_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    let mut violations = Violations::new();
    let settings = [
        ("hostNetwork", spec.host_network),
        ("hostPID", spec.host_pid),
        ("hostIPC", spec.host_ipc),
    ];
    for (field, enabled) in settings {
        if enabled {
            violations.forbid(Scope::Pod, Scope::Pod.path().child(field), true);
        }
    }
    let detail = violations
        .iter()
        .map(|v| format!("{}=true", v.field.leaf()))
        .collect::<Vec<_>>()
        .join(", ");
    violations.into_result(ids::REASON_HOST_NAMESPACES, detail, opts)
}
