//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the items client service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Listener configuration for the inbound routes.
    pub listener: ListenerConfig,

    /// Upstream Items API the routes forward to.
    pub upstream: UpstreamConfig,

    /// Outbound timeouts.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Upstream Items API location.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base address; outbound paths are appended to it.
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Timeouts for outbound calls. Unset means no limit.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total time for one outbound request/response in seconds.
    pub request_secs: Option<u64>,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Full,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.upstream.base_url, "http://localhost:8080");
        assert_eq!(config.timeouts.request_secs, None);
    }

    #[test]
    fn test_partial_sections() {
        let config: ClientConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://items.internal:9000"

            [timeouts]
            request_secs = 15

            [observability]
            log_format = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.base_url, "http://items.internal:9000");
        assert_eq!(config.timeouts.request_secs, Some(15));
        assert_eq!(config.timeouts.connect_secs, None);
        assert_eq!(config.observability.log_format, LogFormat::Compact);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8081");
    }
}
