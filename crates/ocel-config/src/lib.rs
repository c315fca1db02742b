//! # ocel-config
//!
//! Layered configuration loading for the OCEL importer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OCEL_*` prefix, `__` as separator)
//! 2. Project-level `.ocel/config.toml`
//! 3. User-level `~/.config/ocel-import/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OCEL_SOURCE__URL` -> `source.url`, `OCEL_VOLUME__CATALOG` -> `volume.catalog`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ocel_config::OcelConfig;
//!
//! let config = OcelConfig::load_with_dotenv().expect("config");
//! if config.source.is_configured() {
//!     println!("Source URL: {}", config.source.url);
//! }
//! ```

mod error;
mod lake;
mod source;
mod volume;

pub use error::ConfigError;
pub use lake::LakeConfig;
pub use source::{DEFAULT_CHUNK_SIZE, SourceConfig};
pub use volume::VolumeConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every config key.
pub const ENV_PREFIX: &str = "OCEL_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OcelConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub volume: VolumeConfig,
    #[serde(default)]
    pub lake: LakeConfig,
}

impl OcelConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed, or
    /// [`ConfigError::InvalidValue`] if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load `.env` from the working directory (or a parent), then call [`Self::load`].
    ///
    /// A missing `.env` is fine. Variables already set in the process are not
    /// overridden by the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Dotenv`] if a `.env` file exists but is malformed,
    /// otherwise the same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            return Err(error.into());
        }
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ocel/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values figment cannot express as types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero chunk size or an empty volume root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.chunk_size".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.volume.root.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "volume.root".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ocel-import").join("config.toml"))
    }
}

/// Resolve a required value: the explicit one if given, else the configured
/// one if non-empty.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] naming `field` when neither is set.
pub fn require(
    field: &str,
    explicit: Option<&str>,
    configured: &str,
) -> Result<String, ConfigError> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| (!configured.is_empty()).then_some(configured))
        .map(ToString::to_string)
        .ok_or_else(|| ConfigError::missing(field))
}

/// Environment variable that sets a dotted config key (`volume.catalog` -> `OCEL_VOLUME__CATALOG`).
#[must_use]
pub fn env_var_name(field: &str) -> String {
    format!("{ENV_PREFIX}{}", field.replace('.', "__").to_uppercase())
}
