//! Inbound HTTP side.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id set/propagated)
//!     → handlers.rs (route → one upstream call)
//!     → response.rs (JSON, or streamed JSON array for lists)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use server::{build_router, AppState, HttpServer};
