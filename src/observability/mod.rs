//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the upstream client produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (outbound call counters and latency)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```

pub mod logging;
pub mod metrics;
