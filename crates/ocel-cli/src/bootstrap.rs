use anyhow::Context;
use ocel_config::OcelConfig;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<OcelConfig> {
    OcelConfig::load_with_dotenv().context("failed to load ocel-import configuration")
}

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &OcelConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &OcelConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.source.is_configured() && has_single_underscore_key(&env_keys, "OCEL_SOURCE") {
        warnings.push(
            "Source config appears default while OCEL_SOURCE_* env vars exist. Use double underscores (example: OCEL_SOURCE__URL)."
                .to_string(),
        );
    }

    if !config.volume.is_configured() && has_single_underscore_key(&env_keys, "OCEL_VOLUME") {
        warnings.push(
            "Volume config appears default while OCEL_VOLUME_* env vars exist. Use double underscores (example: OCEL_VOLUME__CATALOG)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "OCEL_LAKE") {
        warnings.push(
            "OCEL_LAKE_* env vars are ignored. Use double underscores (example: OCEL_LAKE__DIR)."
                .to_string(),
        );
    }

    warnings
}

/// `OCEL_VOLUME_CATALOG` instead of `OCEL_VOLUME__CATALOG`.
fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}
