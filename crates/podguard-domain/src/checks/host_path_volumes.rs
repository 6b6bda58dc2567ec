use crate::checks::violations::Violations;
use crate::checks::visit::visit_volumes;
use crate::model::{PodMetadata, PodSpec, VolumeSource};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_HOST_PATH_VOLUMES,
        level: Level::Baseline,
        versions: vec![VersionedCheck::new(Version::new(1, 0), host_path_volumes_v1_0)],
    }
}

/// Volumes must not mount host paths.
pub fn host_path_volumes_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    let mut violations = Violations::new();
    for (scope, volume) in visit_volumes(spec) {
        if let VolumeSource::HostPath(host_path) = &volume.source {
            violations.forbid(scope, scope.path().child("hostPath"), host_path.path.as_str());
        }
    }
    let detail = violations.compose(|group| group.subjects.to_string());
    violations.into_result(ids::REASON_HOST_PATH_VOLUMES, detail, opts)
}
