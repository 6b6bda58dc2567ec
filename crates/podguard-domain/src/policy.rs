use serde::{Deserialize, Serialize};

/// Per-evaluation options. Never mutated by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOptions {
    /// Emit one structured field error per violation.
    #[serde(default)]
    pub with_field_errors: bool,

    /// Allow pods running in their own user namespace (`hostUsers: false`)
    /// past the identity checks (`runAsNonRoot`, `runAsUser`).
    #[serde(default)]
    pub relax_for_user_namespace_pods: bool,
}

impl CheckOptions {
    pub fn with_field_errors() -> Self {
        Self {
            with_field_errors: true,
            ..Self::default()
        }
    }

    pub fn relaxed_for_user_namespaces(mut self) -> Self {
        self.relax_for_user_namespace_pods = true;
        self
    }
}
