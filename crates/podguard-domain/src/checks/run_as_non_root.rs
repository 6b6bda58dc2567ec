use crate::checks::violations::{Violations, ViolationKind};
use crate::checks::visit::{Scope, resolve};
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

pub fn check() -> Check {
    Check {
        id: ids::CHECK_RUN_AS_NON_ROOT,
        level: Level::Restricted,
        versions: vec![VersionedCheck::new(Version::new(1, 0), run_as_non_root_v1_0)],
    }
}

/// Every container must run with `runAsNonRoot=true`, either set on the
/// container or inherited from the pod. An explicit `false` is forbidden at
/// any scope; a container left unset under a pod that is not `true` is
/// reported as missing the requirement.
pub fn run_as_non_root_v1_0(_: &PodMetadata, spec: &PodSpec, opts: &CheckOptions) -> CheckResult {
    if opts.relax_for_user_namespace_pods && spec.uses_isolated_user_namespace() {
        return CheckResult::allowed();
    }

    let mut violations = Violations::new();
    let mut pod_run_as_non_root = false;
    for resolved in resolve(spec, |p| p.run_as_non_root, |c| c.run_as_non_root) {
        let scope = resolved.scope;
        let field = scope.security_context_field("runAsNonRoot");
        match (scope, resolved.value) {
            (_, Some(false)) => violations.forbid(scope, field, false),
            (Scope::Pod, Some(true)) => pod_run_as_non_root = true,
            // An unset pod is only reported through its containers.
            (Scope::Pod, None) => {}
            (_, None) if !pod_run_as_non_root => violations.require(scope, field),
            _ => {}
        }
    }

    let detail = violations.compose(|group| match group.kind {
        ViolationKind::Forbidden => format!(
            "{} must not set securityContext.runAsNonRoot=false",
            group.subjects
        ),
        ViolationKind::Required => format!(
            "{} must set securityContext.runAsNonRoot=true",
            group.subjects.or_pod()
        ),
    });
    violations.into_result(ids::REASON_RUN_AS_NON_ROOT, detail, opts)
}
