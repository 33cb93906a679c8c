//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Upstream base URL must be an absolute http(s) URL with a host
//! - Listener and metrics addresses must be socket addresses
//! - Timeouts, when set, must be positive
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.base_url '{value}' is invalid: {reason}")]
    BaseUrl { value: String, reason: String },

    #[error("{field} '{value}' is not a socket address")]
    Address { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(reason) = check_base_url(&config.upstream.base_url) {
        errors.push(ValidationError::BaseUrl {
            value: config.upstream.base_url.clone(),
            reason,
        });
    }

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.timeouts.connect_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.connect_secs" });
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.request_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(value: &str) -> Result<(), String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ClientConfig::default();
        config.upstream.base_url = "ftp://items".to_string();
        config.listener.bind_address = "localhost".to_string();
        config.timeouts.request_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::BaseUrl { .. }));
        assert!(matches!(
            errors[1],
            ValidationError::Address { field: "listener.bind_address", .. }
        ));
        assert_eq!(
            errors[2],
            ValidationError::ZeroTimeout { field: "timeouts.request_secs" }
        );
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let mut config = ClientConfig::default();
        config.upstream.base_url = "/api".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ClientConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
