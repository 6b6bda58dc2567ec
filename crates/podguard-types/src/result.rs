use crate::FieldPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Error type tag of a structured field error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// An explicit value is disallowed.
    Forbidden,
    /// An explicit compliant value is mandatory but absent.
    Required,
}

impl ErrorType {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::Forbidden => "Forbidden",
            ErrorType::Required => "Required value",
        }
    }
}

/// Machine-readable mirror of one violation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub field: FieldPath,
    /// The offending value; `""` for required-but-absent fields.
    pub bad_value: JsonValue,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.field, self.error_type.as_str(), self.bad_value)
    }
}

/// Outcome of one check against one pod.
///
/// Invariant: `allowed` iff reason, detail and field errors are all empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub forbidden_reason: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub forbidden_detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl CheckResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            ..Self::default()
        }
    }

    pub fn forbidden(reason: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            allowed: false,
            forbidden_reason: reason.into(),
            forbidden_detail: detail.into(),
            field_errors: None,
        }
    }

    pub fn with_field_errors(mut self, errors: Option<Vec<FieldError>>) -> Self {
        self.field_errors = errors.filter(|e| !e.is_empty());
        self
    }
}

/// Folded outcome of every check run for one level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCheckResult {
    pub allowed: bool,
    pub forbidden_reasons: Vec<String>,
    pub forbidden_details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

impl Default for AggregateCheckResult {
    fn default() -> Self {
        Self {
            allowed: true,
            forbidden_reasons: Vec::new(),
            forbidden_details: Vec::new(),
            field_errors: None,
        }
    }
}

impl AggregateCheckResult {
    /// Fold one check result in. Allowed results contribute nothing.
    pub fn push(&mut self, result: CheckResult) {
        if result.allowed {
            return;
        }
        self.allowed = false;
        self.forbidden_reasons.push(result.forbidden_reason);
        self.forbidden_details.push(result.forbidden_detail);
        if let Some(errors) = result.field_errors {
            self.field_errors
                .get_or_insert_with(Vec::new)
                .extend(errors);
        }
    }

    pub fn forbidden_reason(&self) -> String {
        self.forbidden_reasons.join(", ")
    }

    pub fn forbidden_detail(&self) -> String {
        self.forbidden_details.join("; ")
    }

    pub fn to_check_result(&self) -> CheckResult {
        if self.allowed {
            return CheckResult::allowed();
        }
        CheckResult::forbidden(self.forbidden_reason(), self.forbidden_detail())
            .with_field_errors(self.field_errors.clone())
    }
}
