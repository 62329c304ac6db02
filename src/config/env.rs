//! `PANTRY_*` environment overrides applied after file resolution.

use crate::error::ConfigError;
use crate::host::Appearance;

use super::Config;

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(value) = non_empty(env_lookup, "PANTRY_APPEARANCE") {
        config.theme.appearance = Appearance::parse(&value);
    }
    if let Some(value) = non_empty(env_lookup, "PANTRY_ROTATION_SECS") {
        config.media.rotation_secs = parse_secs("PANTRY_ROTATION_SECS", &value)?;
    }
    if let Some(url) = non_empty(env_lookup, "PANTRY_FOOD_BASE_URL") {
        config.food.base_url = url;
    }
    if let Some(url) = non_empty(env_lookup, "PANTRY_SUGGEST_BASE_URL") {
        config.suggest.base_url = url;
    }
    if let Some(model) = non_empty(env_lookup, "PANTRY_SUGGEST_MODEL") {
        config.suggest.model = model;
    }
    if let Some(key) = non_empty(env_lookup, "PANTRY_API_KEY") {
        config.suggest.api_key = key;
    }
    if let Some(value) = non_empty(env_lookup, "PANTRY_TIMEOUT_SECS") {
        config.network.timeout_secs = parse_secs("PANTRY_TIMEOUT_SECS", &value)?;
    }
    Ok(())
}

fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_secs(name: &str, value: &str) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid(format!(
            "invalid {name} value `{value}`: expected positive integer seconds"
        ))),
    }
}
