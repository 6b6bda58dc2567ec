//! Explain registry for checks.
//!
//! Maps check IDs (and their forbidden reasons) to human-readable explanations
//! with remediation guidance.

use crate::ids;

/// Explanation entry for a check.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check.
    pub title: &'static str,
    /// The forbidden reason the check reports.
    pub reason: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after manifest examples.
    pub examples: ExamplePair,
}

/// Before and after manifest examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Manifest that would be forbidden.
    pub before: &'static str,
    /// Manifest that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check ID or forbidden reason.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    if let Some(found) = by_check_id(identifier) {
        return Some(found);
    }
    all_check_ids()
        .iter()
        .filter_map(|id| by_check_id(id))
        .find(|e| e.reason == identifier)
}

/// List all known check IDs, baseline checks first.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_PRIVILEGED,
        ids::CHECK_HOST_NAMESPACES,
        ids::CHECK_HOST_PORTS,
        ids::CHECK_HOST_PATH_VOLUMES,
        ids::CHECK_CAPABILITIES_BASELINE,
        ids::CHECK_RUN_AS_NON_ROOT,
        ids::CHECK_RUN_AS_USER,
        ids::CHECK_ALLOW_PRIVILEGE_ESCALATION,
        ids::CHECK_CAPABILITIES_RESTRICTED,
        ids::CHECK_SECCOMP_PROFILE_RESTRICTED,
        ids::CHECK_RESTRICTED_VOLUMES,
    ]
}

fn by_check_id(check_id: &str) -> Option<Explanation> {
    match check_id {
        ids::CHECK_PRIVILEGED => Some(explain_privileged()),
        ids::CHECK_HOST_NAMESPACES => Some(explain_host_namespaces()),
        ids::CHECK_HOST_PORTS => Some(explain_host_ports()),
        ids::CHECK_HOST_PATH_VOLUMES => Some(explain_host_path_volumes()),
        ids::CHECK_CAPABILITIES_BASELINE => Some(explain_capabilities_baseline()),
        ids::CHECK_RUN_AS_NON_ROOT => Some(explain_run_as_non_root()),
        ids::CHECK_RUN_AS_USER => Some(explain_run_as_user()),
        ids::CHECK_ALLOW_PRIVILEGE_ESCALATION => Some(explain_allow_privilege_escalation()),
        ids::CHECK_CAPABILITIES_RESTRICTED => Some(explain_capabilities_restricted()),
        ids::CHECK_SECCOMP_PROFILE_RESTRICTED => Some(explain_seccomp_profile_restricted()),
        ids::CHECK_RESTRICTED_VOLUMES => Some(explain_restricted_volumes()),
        _ => None,
    }
}

// --- Baseline ---

fn explain_privileged() -> Explanation {
    Explanation {
        title: "Privileged Containers",
        reason: ids::REASON_PRIVILEGED,
        description: "\
Privileged containers disable most isolation mechanisms and get access to all
host devices. A privileged container can trivially take over the node.",
        remediation: "\
Remove `securityContext.privileged`, or set it to `false`, on every container,
init container and ephemeral container.",
        examples: ExamplePair {
            before: r#"containers:
- name: app
  securityContext:
    privileged: true"#,
            after: r#"containers:
- name: app
  securityContext:
    privileged: false"#,
        },
    }
}

fn explain_host_namespaces() -> Explanation {
    Explanation {
        title: "Host Namespaces",
        reason: ids::REASON_HOST_NAMESPACES,
        description: "\
Sharing the host network, PID or IPC namespace lets the pod observe and
interfere with host processes and traffic.",
        remediation: "\
Remove `hostNetwork`, `hostPID` and `hostIPC` from the pod spec, or set them to
`false`.",
        examples: ExamplePair {
            before: r#"spec:
  hostNetwork: true
  hostPID: true"#,
            after: r#"spec:
  hostNetwork: false"#,
        },
    }
}

fn explain_host_ports() -> Explanation {
    Explanation {
        title: "Host Ports",
        reason: ids::REASON_HOST_PORT,
        description: "\
Binding container ports on the host bypasses network policy and ties the pod to
a specific node's port space.",
        remediation: "\
Remove `hostPort` from container ports, or set it to `0`. Expose workloads with
a Service instead.",
        examples: ExamplePair {
            before: r#"ports:
- containerPort: 8080
  hostPort: 8080"#,
            after: r#"ports:
- containerPort: 8080"#,
        },
    }
}

fn explain_host_path_volumes() -> Explanation {
    Explanation {
        title: "HostPath Volumes",
        reason: ids::REASON_HOST_PATH_VOLUMES,
        description: "\
HostPath volumes mount directories of the node's filesystem into the pod and
are a common container escape vector.",
        remediation: "\
Replace `hostPath` volumes with `emptyDir`, a persistent volume claim, or a
projected source.",
        examples: ExamplePair {
            before: r#"volumes:
- name: data
  hostPath:
    path: /var/lib/data"#,
            after: r#"volumes:
- name: data
  emptyDir: {}"#,
        },
    }
}

fn explain_capabilities_baseline() -> Explanation {
    Explanation {
        title: "Non-default Capabilities",
        reason: ids::REASON_NON_DEFAULT_CAPABILITIES,
        description: "\
Adding Linux capabilities beyond the container runtime's default set grants
privileges such as SYS_ADMIN or NET_ADMIN that enable host compromise.",
        remediation: "\
Only add capabilities from the default set (AUDIT_WRITE, CHOWN, DAC_OVERRIDE,
FOWNER, FSETID, KILL, MKNOD, NET_BIND_SERVICE, SETFCAP, SETGID, SETPCAP, SETUID,
SYS_CHROOT) in `securityContext.capabilities.add`.",
        examples: ExamplePair {
            before: r#"securityContext:
  capabilities:
    add: ["SYS_ADMIN"]"#,
            after: r#"securityContext:
  capabilities:
    add: ["NET_BIND_SERVICE"]"#,
        },
    }
}

// --- Restricted ---

fn explain_run_as_non_root() -> Explanation {
    Explanation {
        title: "Run As Non-Root",
        reason: ids::REASON_RUN_AS_NON_ROOT,
        description: "\
Containers must be required to run as a non-root user. The requirement can be
set once at the pod level, or on each container individually.",
        remediation: "\
Set `securityContext.runAsNonRoot: true` on the pod, or on every container that
does not inherit it. Never set it to `false`.",
        examples: ExamplePair {
            before: r#"spec:
  containers:
  - name: app"#,
            after: r#"spec:
  securityContext:
    runAsNonRoot: true
  containers:
  - name: app"#,
        },
    }
}

fn explain_run_as_user() -> Explanation {
    Explanation {
        title: "Run As User",
        reason: ids::REASON_RUN_AS_USER,
        description: "\
Containers must not explicitly run as UID 0, at the pod or container level.",
        remediation: "\
Set `runAsUser` to a non-zero UID, or leave it unset and rely on the image
user together with `runAsNonRoot: true`.",
        examples: ExamplePair {
            before: r#"securityContext:
  runAsUser: 0"#,
            after: r#"securityContext:
  runAsUser: 1000"#,
        },
    }
}

fn explain_allow_privilege_escalation() -> Explanation {
    Explanation {
        title: "Privilege Escalation",
        reason: ids::REASON_ALLOW_PRIVILEGE_ESCALATION,
        description: "\
Unless disabled, a process can gain more privileges than its parent, for
example through setuid binaries.",
        remediation: "\
Set `securityContext.allowPrivilegeEscalation: false` on every container.
Windows pods are exempt from v1.25.",
        examples: ExamplePair {
            before: r#"containers:
- name: app"#,
            after: r#"containers:
- name: app
  securityContext:
    allowPrivilegeEscalation: false"#,
        },
    }
}

fn explain_capabilities_restricted() -> Explanation {
    Explanation {
        title: "Unrestricted Capabilities",
        reason: ids::REASON_UNRESTRICTED_CAPABILITIES,
        description: "\
Containers must drop all capabilities and may only add back NET_BIND_SERVICE.",
        remediation: "\
Set `securityContext.capabilities.drop: [\"ALL\"]` on every container and only
list NET_BIND_SERVICE under `add`. Windows pods are exempt from v1.25.",
        examples: ExamplePair {
            before: r#"securityContext:
  capabilities:
    add: ["CHOWN"]"#,
            after: r#"securityContext:
  capabilities:
    drop: ["ALL"]
    add: ["NET_BIND_SERVICE"]"#,
        },
    }
}

fn explain_seccomp_profile_restricted() -> Explanation {
    Explanation {
        title: "Seccomp Profile",
        reason: ids::REASON_SECCOMP_PROFILE,
        description: "\
A seccomp profile must be set explicitly, and it must be `RuntimeDefault` or
`Localhost`. `Unconfined` is never allowed.",
        remediation: "\
Set `securityContext.seccompProfile.type: RuntimeDefault` on the pod, or on
every container. Windows pods are exempt from v1.25.",
        examples: ExamplePair {
            before: r#"securityContext:
  seccompProfile:
    type: Unconfined"#,
            after: r#"securityContext:
  seccompProfile:
    type: RuntimeDefault"#,
        },
    }
}

fn explain_restricted_volumes() -> Explanation {
    Explanation {
        title: "Restricted Volume Types",
        reason: ids::REASON_RESTRICTED_VOLUME_TYPES,
        description: "\
Only configMap, csi, downwardAPI, emptyDir, ephemeral, persistentVolumeClaim,
projected and secret volumes are allowed. This supersedes the baseline
hostPath check.",
        remediation: "\
Move data from in-tree or host volume sources to a persistent volume claim or
a CSI driver.",
        examples: ExamplePair {
            before: r#"volumes:
- name: data
  nfs:
    server: nfs.example.com
    path: /exports"#,
            after: r#"volumes:
- name: data
  persistentVolumeClaim:
    claimName: data"#,
        },
    }
}
