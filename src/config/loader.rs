//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable replacing `upstream.base_url`.
pub const ENV_UPSTREAM_BASE_URL: &str = "ITEMS_UPSTREAM_BASE_URL";

/// Environment variable replacing `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "ITEMS_BIND_ADDRESS";

/// Command line overrides, applied after the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub base_url: Option<String>,
}

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, then apply environment overrides.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    load_or_default(Some(path), &Overrides::default())
}

/// Start from defaults when no file is given, applying environment and
/// command line overrides before validating once.
pub fn load_or_default(path: Option<&Path>, overrides: &Overrides) -> Result<ClientConfig, ConfigError> {
    let config: ClientConfig = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => ClientConfig::default(),
    };
    finalize(config, |key| std::env::var(key).ok(), overrides)
}

/// Apply overrides from `lookup`, then `overrides`, and validate the result.
pub fn finalize<F>(
    mut config: ClientConfig,
    lookup: F,
    overrides: &Overrides,
) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_UPSTREAM_BASE_URL) {
        config.upstream.base_url = base_url;
    }
    if let Some(bind_address) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = bind_address;
    }
    if let Some(base_url) = &overrides.base_url {
        config.upstream.base_url = base_url.clone();
    }
    if let Some(bind_address) = &overrides.bind_address {
        config.listener.bind_address = bind_address.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
