use crate::model::{CcheckConfigV1, SCHEMA_CONFIG_V1};

pub const DEFAULT_CONFIG_FILE: &str = "ccheck.toml";
pub const DEFAULT_POLICY: &str = "policies";
pub const DEFAULT_NAMESPACE: &str = "main";

/// Values given on the command line. `None` defers to the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub policy: Option<String>,
    pub namespace: Option<String>,
    pub strict: Option<bool>,
    pub fail_fast: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveSettings {
    pub policy: String,
    pub namespace: String,
    pub strict: bool,
    pub fail_fast: bool,
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            policy: DEFAULT_POLICY.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            strict: false,
            fail_fast: false,
        }
    }
}

pub fn resolve_settings(
    cfg: CcheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveSettings> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let defaults = EffectiveSettings::default();

    let policy = overrides.policy.or(cfg.policy).unwrap_or(defaults.policy);
    if policy.trim().is_empty() {
        anyhow::bail!("policy path must not be empty");
    }

    let namespace = overrides
        .namespace
        .or(cfg.namespace)
        .unwrap_or(defaults.namespace);
    if namespace.trim().is_empty() {
        anyhow::bail!("namespace must not be empty");
    }

    Ok(EffectiveSettings {
        policy,
        namespace,
        strict: overrides.strict.or(cfg.strict).unwrap_or(defaults.strict),
        fail_fast: overrides
            .fail_fast
            .or(cfg.fail_fast)
            .unwrap_or(defaults.fail_fast),
    })
}
