use crate::checks::utils::pluralize;
use crate::checks::violations::Violations;
use crate::checks::visit::visit_containers;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_HOST_PORTS,
        level: Level::Baseline,
        versions: vec![VersionedCheck::new(Version::new(1, 0), host_ports_v1_0)],
    }
}

/// Containers must not bind host ports.
pub fn host_ports_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    let mut violations = Violations::new();
    for (scope, container) in visit_containers(spec) {
        for (i, port) in container.ports.iter().enumerate() {
            let Some(host_port) = port.host_port.filter(|p| *p != 0) else {
                continue;
            };
            let field = scope.path().child("ports").index(i).child("hostPort");
            violations.forbid(scope, field, host_port);
        }
    }
    let detail = violations.compose(|group| {
        let ports: Vec<&str> = group.values().collect();
        format!(
            "{} {} {} {}",
            group.subjects,
            pluralize("uses", "use", group.subjects.len()),
            pluralize("hostPort", "hostPorts", ports.len()),
            ports.join(", ")
        )
    });
    violations.into_result(ids::REASON_HOST_PORT, detail, opts)
}
