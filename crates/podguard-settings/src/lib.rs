//! Config parsing and level/version resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CONFIG_SCHEMA_V1, PodguardConfigV1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `podguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PodguardConfigV1> {
    let cfg: PodguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the level/version and evaluation options (document + overrides).
pub fn resolve_config(
    cfg: PodguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podguard_types::{Level, Version};

    #[test]
    fn parses_full_document() {
        let cfg = parse_config_toml(
            r#"
schema = "podguard.config.v1"
level = "baseline"
version = "v1.25"
field_errors = true
relax_for_user_namespace_pods = true
"#,
        )
        .unwrap();
        assert_eq!(cfg.level.as_deref(), Some("baseline"));

        let resolved = resolve_config(cfg, Overrides::default()).unwrap();
        assert_eq!(resolved.level_version.level, Level::Baseline);
        assert_eq!(resolved.level_version.version, Version::new(1, 25));
        assert!(resolved.options.with_field_errors);
        assert!(resolved.options.relax_for_user_namespace_pods);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_toml("levle = \"baseline\"").unwrap_err();
        assert!(err.to_string().contains("levle"), "{err}");
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config_toml("level = ").is_err());
    }
}
