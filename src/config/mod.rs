//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → read once at startup to build the shared upstream client
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, Overrides};
pub use schema::{
    ClientConfig, ListenerConfig, LogFormat, ObservabilityConfig, TimeoutConfig, UpstreamConfig,
};
