//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Evaluation determinism
//! - The allowed/empty-output invariant of every result
//! - Field-error emission never changing the decision
//! - Registry version resolution

use crate::checks::default_checks;
use crate::engine::evaluate;
use crate::model::{
    Capabilities, Container, ContainerPort, PodMetadata, PodSecurityContext, PodSpec,
    SeccompProfile, SecurityContext, Volume, VolumeSource,
};
use crate::policy::CheckOptions;
use crate::registry::{Check, CheckRegistry, PodCheck, VersionedCheck};
use podguard_types::{AggregateCheckResult, CheckResult, Level, LevelVersion, Version};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_capability() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ALL".to_string()),
        Just("CHOWN".to_string()),
        Just("NET_BIND_SERVICE".to_string()),
        Just("NET_ADMIN".to_string()),
        Just("SYS_ADMIN".to_string()),
    ]
}

fn arb_seccomp() -> impl Strategy<Value = Option<SeccompProfile>> {
    prop::option::of(
        prop_oneof![
            Just("RuntimeDefault"),
            Just("Localhost"),
            Just("Unconfined"),
        ]
        .prop_map(SeccompProfile::new),
    )
}

fn arb_security_context() -> impl Strategy<Value = SecurityContext> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(0i64..3),
        prop::option::of(any::<bool>()),
        prop::option::of(
            (
                prop::collection::vec(arb_capability(), 0..3),
                prop::collection::vec(arb_capability(), 0..2),
            )
                .prop_map(|(add, drop)| Capabilities { add, drop }),
        ),
        arb_seccomp(),
    )
        .prop_map(
            |(privileged, run_as_non_root, run_as_user, ape, capabilities, seccomp_profile)| {
                SecurityContext {
                    privileged,
                    run_as_non_root,
                    run_as_user,
                    allow_privilege_escalation: ape,
                    capabilities,
                    seccomp_profile,
                }
            },
        )
}

fn arb_container(name: String) -> impl Strategy<Value = Container> {
    (
        prop::option::of(arb_security_context()),
        prop::collection::vec(prop::option::of(0i32..3), 0..3),
    )
        .prop_map(move |(security_context, host_ports)| Container {
            name: name.clone(),
            security_context,
            ports: host_ports
                .into_iter()
                .map(|host_port| ContainerPort {
                    container_port: 80,
                    host_port,
                })
                .collect(),
        })
}

fn arb_containers(prefix: &'static str, max: usize) -> impl Strategy<Value = Vec<Container>> {
    (0..=max).prop_flat_map(move |n| {
        (0..n)
            .map(|i| arb_container(format!("{prefix}{i}")))
            .collect::<Vec<_>>()
    })
}

fn arb_volume(index: usize) -> impl Strategy<Value = Volume> {
    prop_oneof![
        Just(VolumeSource::EmptyDir(json!({}))),
        Just(VolumeSource::Secret(json!({"secretName": "s"}))),
        Just(VolumeSource::Nfs(json!({"server": "nfs"}))),
        Just(VolumeSource::HostPath(crate::model::HostPathVolumeSource {
            path: "/var".to_string(),
        })),
    ]
    .prop_map(move |source| Volume {
        name: format!("v{index}"),
        source,
    })
}

fn arb_pod_spec() -> impl Strategy<Value = PodSpec> {
    (
        prop::option::of(
            (
                prop::option::of(any::<bool>()),
                prop::option::of(0i64..3),
                arb_seccomp(),
            )
                .prop_map(|(run_as_non_root, run_as_user, seccomp_profile)| {
                    PodSecurityContext {
                        run_as_non_root,
                        run_as_user,
                        seccomp_profile,
                    }
                }),
        ),
        arb_containers("i", 2),
        arb_containers("c", 4),
        arb_containers("e", 1),
        (0usize..3).prop_flat_map(|n| (0..n).map(arb_volume).collect::<Vec<_>>()),
        any::<(bool, bool, bool)>(),
        prop::option::of(any::<bool>()),
    )
        .prop_map(
            |(
                security_context,
                init_containers,
                containers,
                ephemeral_containers,
                volumes,
                (host_network, host_pid, host_ipc),
                host_users,
            )| PodSpec {
                security_context,
                init_containers,
                containers,
                ephemeral_containers,
                volumes,
                host_network,
                host_pid,
                host_ipc,
                host_users,
                os: None,
            },
        )
}

fn arb_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Privileged),
        Just(Level::Baseline),
        Just(Level::Restricted),
    ]
}

fn arb_version() -> impl Strategy<Value = Version> {
    prop_oneof![
        4 => (0u32..30).prop_map(|minor| Version::new(1, minor)),
        1 => Just(Version::Latest),
    ]
}

fn arb_options() -> impl Strategy<Value = CheckOptions> {
    (any::<bool>(), any::<bool>()).prop_map(|(with_field_errors, relax)| CheckOptions {
        with_field_errors,
        relax_for_user_namespace_pods: relax,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn registry() -> CheckRegistry {
    CheckRegistry::new(default_checks()).expect("built-in checks are valid")
}

fn run(
    reg: &CheckRegistry,
    lv: LevelVersion,
    spec: &PodSpec,
    opts: CheckOptions,
) -> AggregateCheckResult {
    evaluate(reg, lv, &PodMetadata::default(), spec, &opts)
}

fn assert_allowed_invariant(result: &CheckResult) -> Result<(), TestCaseError> {
    let empty = result.forbidden_reason.is_empty()
        && result.forbidden_detail.is_empty()
        && result.field_errors.as_ref().is_none_or(Vec::is_empty);
    prop_assert_eq!(result.allowed, empty, "result: {:?}", result);
    Ok(())
}

// ============================================================================
// Property tests: evaluation
// ============================================================================

proptest! {
    /// Same input, same output, byte for byte.
    #[test]
    fn evaluation_is_deterministic(
        spec in arb_pod_spec(),
        level in arb_level(),
        version in arb_version(),
        opts in arb_options(),
    ) {
        let reg = registry();
        let lv = LevelVersion::new(level, version);
        let first = run(&reg, lv, &spec, opts);
        let second = run(&reg, lv, &spec, opts);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Every individual check and the folded result satisfy the allowed invariant.
    #[test]
    fn allowed_iff_no_reason_detail_or_errors(
        spec in arb_pod_spec(),
        version in arb_version(),
        opts in arb_options(),
    ) {
        let reg = registry();
        for check in reg.iter() {
            if let Some(versioned) = check.resolve(version) {
                let result = versioned.check_pod.check(&PodMetadata::default(), &spec, &opts);
                assert_allowed_invariant(&result)?;
            }
        }
        let lv = LevelVersion::new(Level::Restricted, version);
        assert_allowed_invariant(&run(&reg, lv, &spec, opts).to_check_result())?;
    }

    /// Field errors are an add-on; the decision and its prose never change.
    #[test]
    fn field_errors_do_not_change_the_decision(
        spec in arb_pod_spec(),
        level in arb_level(),
        version in arb_version(),
        relax in any::<bool>(),
    ) {
        let reg = registry();
        let lv = LevelVersion::new(level, version);
        let base = CheckOptions { with_field_errors: false, relax_for_user_namespace_pods: relax };
        let with = CheckOptions { with_field_errors: true, ..base };

        let without_errors = run(&reg, lv, &spec, base);
        let with_errors = run(&reg, lv, &spec, with);

        prop_assert_eq!(without_errors.allowed, with_errors.allowed);
        prop_assert_eq!(&without_errors.forbidden_reasons, &with_errors.forbidden_reasons);
        prop_assert_eq!(&without_errors.forbidden_details, &with_errors.forbidden_details);
        prop_assert!(without_errors.field_errors.is_none());
        prop_assert_eq!(with_errors.allowed, with_errors.field_errors.is_none());
    }

    /// A stricter level never allows what a laxer level forbids.
    #[test]
    fn restricted_is_at_least_as_strict_as_baseline(
        spec in arb_pod_spec(),
        version in arb_version(),
    ) {
        let reg = registry();
        let opts = CheckOptions::default();
        let baseline = run(&reg, LevelVersion::new(Level::Baseline, version), &spec, opts);
        let restricted = run(&reg, LevelVersion::new(Level::Restricted, version), &spec, opts);
        prop_assert!(baseline.allowed || !restricted.allowed);
        prop_assert!(run(&reg, LevelVersion::new(Level::Privileged, version), &spec, opts).allowed);
    }
}

// ============================================================================
// Property tests: registry version resolution
// ============================================================================

fn tagged(minor: u32) -> impl PodCheck + 'static {
    move |_: &PodMetadata, _: &PodSpec, _: &CheckOptions| {
        CheckResult::forbidden(minor.to_string(), String::new())
    }
}

proptest! {
    /// Resolution picks the greatest minimum version at or before the target.
    #[test]
    fn resolution_is_monotonic(
        minors in prop::collection::btree_set(0u32..40, 1..5),
        target in 0u32..50,
    ) {
        let check = Check {
            id: "versioned",
            level: Level::Baseline,
            versions: minors
                .iter()
                .map(|&m| VersionedCheck::new(Version::new(1, m), tagged(m)))
                .collect(),
        };
        let reg = CheckRegistry::new(vec![check]).expect("strictly increasing versions");

        let expected = minors.range(..=target).next_back().copied();
        let resolved = reg
            .resolve("versioned", Version::new(1, target))
            .expect("registered")
            .map(|v| v.minimum_version);
        prop_assert_eq!(resolved, expected.map(|m| Version::new(1, m)));

        let latest = reg.resolve("versioned", Version::Latest).expect("registered");
        let newest = minors.iter().next_back().copied();
        prop_assert_eq!(latest.map(|v| v.minimum_version), newest.map(|m| Version::new(1, m)));
    }
}
