use crate::model::{
    Container, ContainerPort, HostPathVolumeSource, PodSecurityContext, PodSpec, SecurityContext,
    Volume, VolumeSource,
};
use serde_json::json;

pub fn container(name: &str) -> Container {
    Container {
        name: name.to_string(),
        ..Container::default()
    }
}

/// A container with an (initially empty) security context edited by `edit`.
pub fn with_context(name: &str, edit: impl FnOnce(&mut SecurityContext)) -> Container {
    let mut sc = SecurityContext::default();
    edit(&mut sc);
    Container {
        security_context: Some(sc),
        ..container(name)
    }
}

pub fn with_host_ports(name: &str, host_ports: &[i32]) -> Container {
    Container {
        ports: host_ports
            .iter()
            .map(|&p| ContainerPort {
                container_port: 8080,
                host_port: Some(p),
            })
            .collect(),
        ..container(name)
    }
}

pub fn pod_spec(containers: Vec<Container>) -> PodSpec {
    PodSpec {
        containers,
        ..PodSpec::default()
    }
}

pub fn pod_context(edit: impl FnOnce(&mut PodSecurityContext)) -> Option<PodSecurityContext> {
    let mut sc = PodSecurityContext::default();
    edit(&mut sc);
    Some(sc)
}

pub fn host_path_volume(name: &str, path: &str) -> Volume {
    Volume {
        name: name.to_string(),
        source: VolumeSource::HostPath(HostPathVolumeSource {
            path: path.to_string(),
        }),
    }
}

pub fn empty_dir_volume(name: &str) -> Volume {
    Volume {
        name: name.to_string(),
        source: VolumeSource::EmptyDir(json!({})),
    }
}

pub fn nfs_volume(name: &str) -> Volume {
    Volume {
        name: name.to_string(),
        source: VolumeSource::Nfs(json!({"server": "nfs.local", "path": "/export"})),
    }
}
