use crate::checks::violations::Violations;
use crate::checks::visit::resolve;
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_RUN_AS_USER,
        level: Level::Restricted,
        versions: vec![VersionedCheck::new(Version::new(1, 23), run_as_user_v1_23)],
    }
}

/// Neither the pod nor any container may set `runAsUser=0`. An unset value
/// never violates.
pub fn run_as_user_v1_23(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    if opts.relax_for_user_namespace_pods && spec.uses_isolated_user_namespace() {
        return CheckResult::allowed();
    }

    let mut violations = Violations::new();
    for resolved in resolve(spec, |p| p.run_as_user, |c| c.run_as_user) {
        if resolved.value == Some(0) {
            let scope = resolved.scope;
            violations.forbid(scope, scope.security_context_field("runAsUser"), 0);
        }
    }
    let detail = violations.compose(|group| format!("{} must not set runAsUser=0", group.subjects));
    violations.into_result(ids::REASON_RUN_AS_USER, detail, opts)
}
