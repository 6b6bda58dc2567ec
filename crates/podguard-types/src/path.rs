use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dotted path to a field of the inspected pod, e.g.
/// `spec.containers[3].securityContext.privileged`.
///
/// Container paths always use the manifest index, never the container name.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new<S: Into<String>>(root: S) -> Self {
        Self(root.into())
    }

    /// Append a named child: `spec` + `hostPID` -> `spec.hostPID`.
    pub fn child(&self, name: &str) -> FieldPath {
        if self.0.is_empty() {
            return FieldPath(name.to_string());
        }
        FieldPath(format!("{}.{}", self.0, name))
    }

    /// Append a list index: `spec.containers` + `2` -> `spec.containers[2]`.
    pub fn index(&self, i: usize) -> FieldPath {
        FieldPath(format!("{}[{}]", self.0, i))
    }

    /// Last named segment, without any trailing index.
    pub fn leaf(&self) -> &str {
        let last = self.0.rsplit('.').next().unwrap_or(&self.0);
        match last.find('[') {
            Some(pos) => &last[..pos],
            None => last,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<FieldPath> for String {
    fn from(value: FieldPath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::FieldPath;

    #[test]
    fn builds_indexed_container_paths() {
        let path = FieldPath::new("spec")
            .child("containers")
            .index(3)
            .child("securityContext")
            .child("privileged");
        assert_eq!(path.as_str(), "spec.containers[3].securityContext.privileged");
        assert_eq!(path.leaf(), "privileged");
    }

    #[test]
    fn leaf_strips_index() {
        let path = FieldPath::new("spec").child("volumes").index(0);
        assert_eq!(path.leaf(), "volumes");
        assert_eq!(FieldPath::new("").child("spec").as_str(), "spec");
    }
}
