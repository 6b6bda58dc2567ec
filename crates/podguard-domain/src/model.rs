//! Read-only workload model inspected by the checks.
//!
//! Field names follow the Kubernetes pod manifest (camelCase) so pod JSON
//! deserializes directly. Only the fields some check reads are modelled.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    #[serde(default)]
    pub metadata: PodMetadata,
    #[serde(default)]
    pub spec: PodSpec,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ephemeral_containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    #[serde(default)]
    pub host_network: bool,
    #[serde(default, rename = "hostPID")]
    pub host_pid: bool,
    #[serde(default, rename = "hostIPC")]
    pub host_ipc: bool,
    /// `Some(false)` opts the pod into its own user namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_users: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<PodOs>,
}

impl PodSpec {
    /// True when the pod declares it does not share the host user namespace.
    pub fn uses_isolated_user_namespace(&self) -> bool {
        self.host_users == Some(false)
    }

    pub fn is_windows(&self) -> bool {
        self.os.as_ref().is_some_and(|os| os.name == "windows")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodOs {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_profile: Option<SeccompProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seccomp_profile: Option<SeccompProfile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    pub container_port: i32,
    /// `None` and `Some(0)` both mean no host port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeccompProfile {
    #[serde(rename = "type")]
    pub profile_type: String,
}

impl SeccompProfile {
    pub fn new(profile_type: &str) -> Self {
        Self {
            profile_type: profile_type.to_string(),
        }
    }
}

/// A named pod volume.
///
/// A volume without a source key is an `emptyDir`; a source key not listed in
/// [`VolumeSource`] is kept as [`VolumeSource::Other`] instead of failing the
/// whole pod.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawVolume")]
pub struct Volume {
    pub name: String,
    pub source: VolumeSource,
}

#[derive(Deserialize)]
struct RawVolume {
    name: String,
    #[serde(flatten)]
    sources: Map<String, Value>,
}

impl TryFrom<RawVolume> for Volume {
    type Error = serde_json::Error;

    fn try_from(raw: RawVolume) -> Result<Self, Self::Error> {
        let source = match raw.sources.into_iter().next() {
            None => VolumeSource::EmptyDir(Value::Object(Map::new())),
            Some((key, value)) => VolumeSource::from_entry(key, value)?,
        };
        Ok(Volume {
            name: raw.name,
            source,
        })
    }
}

#[derive(Serialize)]
struct KnownVolume<'a> {
    name: &'a str,
    #[serde(flatten)]
    source: &'a VolumeSource,
}

impl Serialize for Volume {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.source {
            VolumeSource::Other { key, value } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("name", &self.name)?;
                map.serialize_entry(key, value)?;
                map.end()
            }
            source => KnownVolume {
                name: &self.name,
                source,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostPathVolumeSource {
    pub path: String,
}

/// The single source a volume is backed by, keyed like the manifest field.
///
/// Payloads other than `hostPath` are opaque to every check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VolumeSource {
    HostPath(HostPathVolumeSource),
    EmptyDir(Value),
    ConfigMap(Value),
    Secret(Value),
    PersistentVolumeClaim(Value),
    Projected(Value),
    #[serde(rename = "downwardAPI")]
    DownwardApi(Value),
    Csi(Value),
    Ephemeral(Value),
    GcePersistentDisk(Value),
    AwsElasticBlockStore(Value),
    GitRepo(Value),
    Nfs(Value),
    Iscsi(Value),
    Glusterfs(Value),
    Rbd(Value),
    FlexVolume(Value),
    Cinder(Value),
    Cephfs(Value),
    Flocker(Value),
    Fc(Value),
    AzureFile(Value),
    AzureDisk(Value),
    VsphereVolume(Value),
    Quobyte(Value),
    PhotonPersistentDisk(Value),
    PortworxVolume(Value),
    #[serde(rename = "scaleIO")]
    ScaleIo(Value),
    Storageos(Value),
    /// Any source key not listed above, e.g. `image`.
    #[serde(skip)]
    Other { key: String, value: Value },
}

const KNOWN_SOURCE_KEYS: &[&str] = &[
    "hostPath",
    "emptyDir",
    "configMap",
    "secret",
    "persistentVolumeClaim",
    "projected",
    "downwardAPI",
    "csi",
    "ephemeral",
    "gcePersistentDisk",
    "awsElasticBlockStore",
    "gitRepo",
    "nfs",
    "iscsi",
    "glusterfs",
    "rbd",
    "flexVolume",
    "cinder",
    "cephfs",
    "flocker",
    "fc",
    "azureFile",
    "azureDisk",
    "vsphereVolume",
    "quobyte",
    "photonPersistentDisk",
    "portworxVolume",
    "scaleIO",
    "storageos",
];

impl VolumeSource {
    /// Build from one manifest entry. Known keys must carry a well-formed
    /// payload; unknown keys are kept verbatim.
    pub fn from_entry(key: String, value: Value) -> Result<Self, serde_json::Error> {
        if !KNOWN_SOURCE_KEYS.contains(&key.as_str()) {
            return Ok(VolumeSource::Other { key, value });
        }
        let mut entry = Map::new();
        entry.insert(key, value);
        serde_json::from_value(Value::Object(entry))
    }

    /// Manifest key of this source, e.g. `hostPath`.
    pub fn type_name(&self) -> &str {
        match self {
            VolumeSource::HostPath(_) => "hostPath",
            VolumeSource::EmptyDir(_) => "emptyDir",
            VolumeSource::ConfigMap(_) => "configMap",
            VolumeSource::Secret(_) => "secret",
            VolumeSource::PersistentVolumeClaim(_) => "persistentVolumeClaim",
            VolumeSource::Projected(_) => "projected",
            VolumeSource::DownwardApi(_) => "downwardAPI",
            VolumeSource::Csi(_) => "csi",
            VolumeSource::Ephemeral(_) => "ephemeral",
            VolumeSource::GcePersistentDisk(_) => "gcePersistentDisk",
            VolumeSource::AwsElasticBlockStore(_) => "awsElasticBlockStore",
            VolumeSource::GitRepo(_) => "gitRepo",
            VolumeSource::Nfs(_) => "nfs",
            VolumeSource::Iscsi(_) => "iscsi",
            VolumeSource::Glusterfs(_) => "glusterfs",
            VolumeSource::Rbd(_) => "rbd",
            VolumeSource::FlexVolume(_) => "flexVolume",
            VolumeSource::Cinder(_) => "cinder",
            VolumeSource::Cephfs(_) => "cephfs",
            VolumeSource::Flocker(_) => "flocker",
            VolumeSource::Fc(_) => "fc",
            VolumeSource::AzureFile(_) => "azureFile",
            VolumeSource::AzureDisk(_) => "azureDisk",
            VolumeSource::VsphereVolume(_) => "vsphereVolume",
            VolumeSource::Quobyte(_) => "quobyte",
            VolumeSource::PhotonPersistentDisk(_) => "photonPersistentDisk",
            VolumeSource::PortworxVolume(_) => "portworxVolume",
            VolumeSource::ScaleIo(_) => "scaleIO",
            VolumeSource::Storageos(_) => "storageos",
            VolumeSource::Other { key, .. } => key,
        }
    }
}
