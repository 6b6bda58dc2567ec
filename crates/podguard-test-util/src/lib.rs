//! Shared test utilities for the podguard workspace.
//!
//! Golden fixtures live in `tests/fixtures/<case>/` at the repo root:
//! - `pod.json`: the pod manifest under evaluation
//! - `podguard.toml`: level, version and options
//! - `expected.json`: the serialized aggregate result

use serde_json::Value;
use std::path::{Path, PathBuf};

pub const POD_FILE: &str = "pod.json";
pub const CONFIG_FILE: &str = "podguard.toml";
pub const EXPECTED_FILE: &str = "expected.json";

/// Repo-level `tests/fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("podguard-test-util lives two levels below the repo root")
        .join("tests")
        .join("fixtures")
}

/// Every fixture case name, sorted.
pub fn fixture_names() -> Vec<String> {
    let entries = std::fs::read_dir(fixtures_dir()).expect("fixtures directory should exist");
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|e| e.path().join(POD_FILE).is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();
    names
}

pub fn read_fixture_file(case: &str, file: &str) -> String {
    let path = fixtures_dir().join(case).join(file);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

pub fn read_fixture_json(case: &str, file: &str) -> Value {
    let text = read_fixture_file(case, file);
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("invalid JSON in {case}/{file}: {e}"))
}

/// Sort every `fieldErrors` array by (field, type) at any depth.
///
/// Field error order is stable but callers may resort; golden files are
/// compared order-insensitively.
pub fn normalize_field_errors(mut value: Value) -> Value {
    sort_field_errors_recursive(&mut value);
    value
}

fn sort_key(error: &Value) -> (String, String) {
    let text = |key: &str| {
        error
            .get(key)
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    };
    (text("field"), text("type"))
}

fn sort_field_errors_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(errors)) = map.get_mut("fieldErrors") {
                errors.sort_by_key(sort_key);
            }
            for val in map.values_mut() {
                sort_field_errors_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                sort_field_errors_recursive(val);
            }
        }
        _ => {}
    }
}
