//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `.env` file exists but cannot be read or parsed.
    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required value was given neither on the command line nor in configuration.
    #[error("Parameter '{field}' is required (pass it as a flag or set {env})")]
    MissingField { field: String, env: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    /// Build a [`ConfigError::MissingField`] for a dotted key like `volume.catalog`.
    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
            env: crate::env_var_name(field),
        }
    }
}
