//! Stable identifiers for checks and their forbidden reasons.
//!
//! `CHECK_*` names a registered check. `REASON_*` is the short, machine-stable
//! reason reported when that check forbids a pod.

// Checks: baseline
pub const CHECK_PRIVILEGED: &str = "privileged";
pub const CHECK_HOST_NAMESPACES: &str = "hostNamespaces";
pub const CHECK_HOST_PORTS: &str = "hostPorts";
pub const CHECK_HOST_PATH_VOLUMES: &str = "hostPathVolumes";
pub const CHECK_CAPABILITIES_BASELINE: &str = "capabilities_baseline";

// Checks: restricted
pub const CHECK_RUN_AS_NON_ROOT: &str = "runAsNonRoot";
pub const CHECK_RUN_AS_USER: &str = "runAsUser";
pub const CHECK_ALLOW_PRIVILEGE_ESCALATION: &str = "allowPrivilegeEscalation";
pub const CHECK_CAPABILITIES_RESTRICTED: &str = "capabilities_restricted";
pub const CHECK_SECCOMP_PROFILE_RESTRICTED: &str = "seccompProfile_restricted";
pub const CHECK_RESTRICTED_VOLUMES: &str = "restrictedVolumes";

// Reasons
pub const REASON_PRIVILEGED: &str = "privileged";
pub const REASON_HOST_NAMESPACES: &str = "host namespaces";
pub const REASON_HOST_PORT: &str = "hostPort";
pub const REASON_HOST_PATH_VOLUMES: &str = "hostPath volumes";
pub const REASON_NON_DEFAULT_CAPABILITIES: &str = "non-default capabilities";
pub const REASON_RUN_AS_NON_ROOT: &str = "runAsNonRoot != true";
pub const REASON_RUN_AS_USER: &str = "runAsUser=0";
pub const REASON_ALLOW_PRIVILEGE_ESCALATION: &str = "allowPrivilegeEscalation != false";
pub const REASON_UNRESTRICTED_CAPABILITIES: &str = "unrestricted capabilities";
pub const REASON_SECCOMP_PROFILE: &str = "seccompProfile";
pub const REASON_RESTRICTED_VOLUME_TYPES: &str = "restricted volume types";
