//! Config parsing and resolution.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{CcheckConfigV1, SCHEMA_CONFIG_V1};
pub use resolve::{
    EffectiveSettings, Overrides, DEFAULT_CONFIG_FILE, DEFAULT_NAMESPACE, DEFAULT_POLICY,
};

/// Parse `ccheck.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CcheckConfigV1> {
    let cfg: CcheckConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the settings a run uses: overrides, then config file, then defaults.
pub fn resolve_settings(
    cfg: CcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveSettings> {
    resolve::resolve_settings(cfg, overrides)
}
