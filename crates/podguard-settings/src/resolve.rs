use crate::model::{CONFIG_SCHEMA_V1, PodguardConfigV1};
use anyhow::Context;
use podguard_domain::policy::CheckOptions;
use podguard_types::{Level, LevelVersion, Version};

/// Caller-supplied values that win over the config document.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub level: Option<String>,
    pub version: Option<String>,
    pub field_errors: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub level_version: LevelVersion,
    pub options: CheckOptions,
}

pub fn resolve_config(
    cfg: PodguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref() {
        anyhow::ensure!(
            schema == CONFIG_SCHEMA_V1,
            "unsupported schema: {schema} (expected '{CONFIG_SCHEMA_V1}')"
        );
    }

    let level = match overrides.level.or(cfg.level) {
        Some(s) => s
            .parse::<Level>()
            .with_context(|| format!("invalid level: {s}"))?,
        None => Level::Restricted,
    };

    let version = match overrides.version.or(cfg.version) {
        Some(s) => s
            .parse::<Version>()
            .with_context(|| format!("invalid version: {s}"))?,
        None => Version::Latest,
    };

    let options = CheckOptions {
        with_field_errors: overrides
            .field_errors
            .or(cfg.field_errors)
            .unwrap_or(false),
        relax_for_user_namespace_pods: cfg.relax_for_user_namespace_pods.unwrap_or(false),
    };

    Ok(ResolvedConfig {
        level_version: LevelVersion::new(level, version),
        options,
    })
}
