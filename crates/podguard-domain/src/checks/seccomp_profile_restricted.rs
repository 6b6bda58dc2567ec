use crate::checks::utils::join_quote;
use crate::checks::violations::{Violations, ViolationKind};
use crate::checks::visit::{Scope, resolve};
use crate::model::{PodMetadata, PodSpec};
use crate::policy::CheckOptions;
use crate::registry::{Check, VersionedCheck};
use podguard_types::{CheckResult, Level, Version, ids};

const VALID_PROFILE_TYPES: &[&str] = &["RuntimeDefault", "Localhost"];

pub fn check() -> Check {
    Check {
        id: ids::CHECK_SECCOMP_PROFILE_RESTRICTED,
        level: Level::Restricted,
        versions: vec![
            VersionedCheck::new(Version::new(1, 19), seccomp_profile_restricted_v1_19),
            VersionedCheck::new(Version::new(1, 25), seccomp_profile_restricted_v1_25),
        ],
    }
}

/// A `RuntimeDefault` or `Localhost` seccomp profile must apply to every
/// container, set on the container or inherited from the pod.
pub fn seccomp_profile_restricted_v1_19(
    _: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    let mut violations = Violations::new();
    let mut pod_profile_set = false;
    let resolved = resolve(
        spec,
        |p| p.seccomp_profile.as_ref(),
        |c| c.seccomp_profile.as_ref(),
    );
    for r in resolved {
        let field = r
            .scope
            .security_context_field("seccompProfile")
            .child("type");
        match (r.scope, r.value) {
            (_, Some(profile))
                if !VALID_PROFILE_TYPES.contains(&profile.profile_type.as_str()) =>
            {
                violations.forbid(r.scope, field, profile.profile_type.as_str());
            }
            (Scope::Pod, Some(_)) => pod_profile_set = true,
            (Scope::Pod, None) => {}
            (_, None) if !pod_profile_set => violations.require(r.scope, field),
            _ => {}
        }
    }
    let detail = violations.compose(|group| match group.kind {
        ViolationKind::Forbidden => format!(
            "{} must not set securityContext.seccompProfile.type to {}",
            group.subjects,
            join_quote(group.values())
        ),
        ViolationKind::Required => format!(
            r#"{} must set securityContext.seccompProfile.type to "RuntimeDefault" or "Localhost""#,
            group.subjects.or_pod()
        ),
    });
    violations.into_result(ids::REASON_SECCOMP_PROFILE, detail, opts)
}

/// As v1.19, but Windows pods are exempt.
pub fn seccomp_profile_restricted_v1_25(
    metadata: &PodMetadata,
    spec: &PodSpec,
    opts: &CheckOptions,
) -> CheckResult {
    if spec.is_windows() {
        return CheckResult::allowed();
    }
    seccomp_profile_restricted_v1_19(metadata, spec, opts)
}
