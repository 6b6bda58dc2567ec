use crate::checks::utils::{join_quote, pluralize};
use crate::checks::violations::Violations;
use crate::checks::visit::visit_volumes;
use crate::model::{PodMetadata, PodSpec, VolumeSource};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_RESTRICTED_VOLUMES,
        level: Level::Restricted,
        versions: vec![
            VersionedCheck::new(Version::new(1, 0), restricted_volumes_v1_0)
                .overriding(&[ids::CHECK_HOST_PATH_VOLUMES]),
        ],
    }
}

fn is_allowed(source: &VolumeSource) -> bool {
    matches!(
        source,
        VolumeSource::ConfigMap(_)
            | VolumeSource::Csi(_)
            | VolumeSource::DownwardApi(_)
            | VolumeSource::EmptyDir(_)
            | VolumeSource::Ephemeral(_)
            | VolumeSource::PersistentVolumeClaim(_)
            | VolumeSource::Projected(_)
            | VolumeSource::Secret(_)
    )
}

/// Volumes must use one of the allowed, non-host, non-legacy source types.
/// Unrecognized source keys are restricted too and reported by key.
pub fn restricted_volumes_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    let mut violations = Violations::new();
    for (scope, volume) in visit_volumes(spec) {
        if is_allowed(&volume.source) {
            continue;
        }
        let type_name = volume.source.type_name();
        violations.forbid(scope, scope.path().child(type_name), type_name);
    }
    let detail = violations.compose(|group| {
        let types: Vec<&str> = group.values().collect();
        format!(
            "{} {} {} {}",
            group.subjects,
            pluralize("uses", "use", group.subjects.len()),
            pluralize("restricted volume type", "restricted volume types", types.len()),
            join_quote(types)
        )
    });
    violations.into_result(ids::REASON_RESTRICTED_VOLUME_TYPES, detail, opts)
}
