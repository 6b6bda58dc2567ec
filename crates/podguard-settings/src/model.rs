use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Expected value of the optional `schema` key.
pub const CONFIG_SCHEMA_V1: &str = "podguard.config.v1";

/// `podguard.toml` schema v1.
///
/// Values stay strings here; they are validated during resolution so errors
/// can name the offending key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PodguardConfigV1 {
    /// Optional schema string for tooling (`podguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `privileged`, `baseline` or `restricted` (default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// `vMAJOR.MINOR` or `latest` (default).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Emit structured field errors alongside the detail text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<bool>,

    /// Let pods with `hostUsers: false` pass the identity checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relax_for_user_namespace_pods: Option<bool>,
}
