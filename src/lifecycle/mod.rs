//! Lifecycle management.
//!
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Build upstream client → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or Shutdown::trigger → Stop accepting → Drain in-flight → Exit
//! ```

pub mod shutdown;

pub use shutdown::{shutdown_signal, Shutdown};
