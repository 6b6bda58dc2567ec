//! Stable DTOs and IDs used across the podguard workspace.
//!
//! This crate is intentionally boring:
//! - check results and structured field errors
//! - stable string IDs and reason codes
//! - policy levels and versions
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod level;
pub mod path;
pub mod result;

pub use explain::{ExamplePair, Explanation, all_check_ids, lookup_explanation};
pub use level::{Level, LevelVersion, ParseLevelError, ParseVersionError, Version};
pub use path::FieldPath;
pub use result::{AggregateCheckResult, CheckResult, ErrorType, FieldError};
