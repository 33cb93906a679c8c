//! Items client: REST passthrough to an upstream Items API.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ /items/client/...  ──▶ handlers ──▶ UpstreamClient ──▶ {base}/api/rest/items
//!                                        │             retrieve() / exchange()
//!   Client ◀── JSON / JSON array  ◀──────┴──── UpstreamResponse ◀──── upstream response
//! ```
//!
//! One shared upstream client is built at startup from the configured base
//! address. Every inbound call makes exactly one outbound call; list bodies
//! are streamed item by item in both directions.

pub mod config;
pub mod error;
pub mod http;
pub mod item;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::ClientConfig;
pub use error::{ProxyError, ProxyResult};
pub use http::HttpServer;
pub use item::Item;
pub use lifecycle::Shutdown;
pub use upstream::UpstreamClient;
