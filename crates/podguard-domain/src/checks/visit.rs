//! Scope resolution: the ordered walk over the pod and its containers.
//!
//! Order is fixed and drives both detail text and field-error order:
//! pod, init containers, containers, ephemeral containers, each in manifest
//! order.

use crate::model::{Container, PodSecurityContext, PodSpec, SecurityContext, Volume};
use podguard_types::FieldPath;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    InitContainer,
    Container,
    EphemeralContainer,
}

impl ContainerRole {
    pub fn field_name(self) -> &'static str {
        match self {
            ContainerRole::InitContainer => "initContainers",
            ContainerRole::Container => "containers",
            ContainerRole::EphemeralContainer => "ephemeralContainers",
        }
    }
}

/// The pod itself, one container, or one volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope<'a> {
    Pod,
    Container {
        role: ContainerRole,
        index: usize,
        name: &'a str,
    },
    Volume {
        index: usize,
        name: &'a str,
    },
}

impl Scope<'_> {
    /// `spec`, `spec.initContainers[0]`, `spec.volumes[2]`, ...
    pub fn path(&self) -> FieldPath {
        let spec = FieldPath::new("spec");
        match self {
            Scope::Pod => spec,
            Scope::Container { role, index, .. } => spec.child(role.field_name()).index(*index),
            Scope::Volume { index, .. } => spec.child("volumes").index(*index),
        }
    }

    /// Path of a field inside this scope's security context.
    pub fn security_context_field(&self, field: &str) -> FieldPath {
        self.path().child("securityContext").child(field)
    }
}

/// One scope together with its own value of the attribute being checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved<'a, T> {
    pub scope: Scope<'a>,
    pub value: Option<T>,
}

/// Every container of the pod, in traversal order.
pub fn visit_containers(spec: &PodSpec) -> impl Iterator<Item = (Scope<'_>, &Container)> {
    with_role(ContainerRole::InitContainer, &spec.init_containers)
        .chain(with_role(ContainerRole::Container, &spec.containers))
        .chain(with_role(
            ContainerRole::EphemeralContainer,
            &spec.ephemeral_containers,
        ))
}

fn with_role(
    role: ContainerRole,
    list: &[Container],
) -> impl Iterator<Item = (Scope<'_>, &Container)> {
    list.iter().enumerate().map(move |(index, c)| {
        (
            Scope::Container {
                role,
                index,
                name: c.name.as_str(),
            },
            c,
        )
    })
}

pub fn visit_volumes(spec: &PodSpec) -> impl Iterator<Item = (Scope<'_>, &Volume)> {
    spec.volumes.iter().enumerate().map(|(index, v)| {
        (
            Scope::Volume {
                index,
                name: v.name.as_str(),
            },
            v,
        )
    })
}

/// Resolve one security attribute at every scope: the pod first, then each
/// container. A scope without a security context resolves to `None`; no value
/// is inherited from the pod.
pub fn resolve<'a, T>(
    spec: &'a PodSpec,
    pod_value: impl Fn(&'a PodSecurityContext) -> Option<T>,
    container_value: impl Fn(&'a SecurityContext) -> Option<T>,
) -> Vec<Resolved<'a, T>> {
    let mut out = vec![Resolved {
        scope: Scope::Pod,
        value: spec.security_context.as_ref().and_then(&pod_value),
    }];
    for (scope, container) in visit_containers(spec) {
        out.push(Resolved {
            scope,
            value: container.security_context.as_ref().and_then(&container_value),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{container, pod_spec, with_context};

    #[test]
    fn visits_init_then_regular_then_ephemeral() {
        let mut spec = pod_spec(vec![container("c0"), container("c1")]);
        spec.init_containers = vec![container("i0")];
        spec.ephemeral_containers = vec![container("e0")];

        let paths: Vec<String> = visit_containers(&spec)
            .map(|(scope, _)| scope.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "spec.initContainers[0]",
                "spec.containers[0]",
                "spec.containers[1]",
                "spec.ephemeralContainers[0]",
            ]
        );
    }

    #[test]
    fn resolve_puts_pod_first_and_does_not_inherit() {
        let mut spec = pod_spec(vec![
            container("a"),
            with_context("b", |sc| sc.run_as_user = Some(7)),
        ]);
        spec.security_context = Some(PodSecurityContext {
            run_as_user: Some(1000),
            ..PodSecurityContext::default()
        });

        let resolved = resolve(&spec, |p| p.run_as_user, |c| c.run_as_user);
        let values: Vec<Option<i64>> = resolved.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![Some(1000), None, Some(7)]);
        assert_eq!(resolved[0].scope, Scope::Pod);
    }

    #[test]
    fn security_context_field_paths() {
        assert_eq!(
            Scope::Pod.security_context_field("runAsUser").as_str(),
            "spec.securityContext.runAsUser"
        );
        let scope = Scope::Container {
            role: ContainerRole::EphemeralContainer,
            index: 2,
            name: "dbg",
        };
        assert_eq!(
            scope.security_context_field("privileged").as_str(),
            "spec.ephemeralContainers[2].securityContext.privileged"
        );
    }
}
