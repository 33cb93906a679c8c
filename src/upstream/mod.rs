//! Outbound side: calls to the upstream Items API.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (build URL, attach body, send)
//!     → retrieve(): status hooks, default status check
//!       exchange(): raw response handed to the caller
//!     → response.rs (consume body: item, item stream, text, discard)
//!     → codec.rs (incremental array decoding for list bodies)
//! ```

pub mod client;
pub mod codec;
pub mod response;

pub use client::{StatusPredicate, UpstreamClient, UpstreamRequest};
pub use codec::{decode_items, ItemStream, JsonArrayDecoder};
pub use response::UpstreamResponse;
