//! Response bodies for the inbound routes.
//!
//! # Responsibilities
//! - Re-encode a decoded item stream as a streamed JSON array
//!
//! # Design Decisions
//! - The first element is decoded before the status line is sent, so a body
//!   that is broken from the start still gets an error response
//! - Each later item is written as soon as the upstream stream yields it
//! - A mid-stream failure aborts the body; the status line has already gone out

use axum::{
    body::{Body, Bytes},
    http::header,
    response::{IntoResponse, Response},
};
use futures_util::stream::{self, StreamExt};

use crate::error::{ProxyError, ProxyResult};
use crate::upstream::ItemStream;

/// Stream `items` to the client as `[item, item, ...]`.
///
/// Fails without building a response when the first element cannot be decoded.
pub async fn json_array(mut items: ItemStream) -> ProxyResult<Response> {
    let head = match items.next().await {
        Some(Err(e)) => return Err(e),
        Some(Ok(item)) => Some(item),
        None => None,
    };

    Ok(encode_array(stream::iter(head.map(Ok)).chain(items).boxed()))
}

fn encode_array(items: ItemStream) -> Response {
    let mut first = true;
    let elements = items.map(move |result| {
        let item = match result {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(error = %e, "Aborting item stream");
                return Err(e);
            }
        };
        tracing::trace!(item = ?item, "Emitting item");

        let mut buf = if first { Vec::new() } else { vec![b','] };
        first = false;
        serde_json::to_writer(&mut buf, &item).map_err(ProxyError::Decode)?;
        Ok(Bytes::from(buf))
    });

    let body = stream::once(async { Ok::<_, ProxyError>(Bytes::from_static(b"[")) })
        .chain(elements)
        .chain(stream::once(async { Ok(Bytes::from_static(b"]")) }));

    (
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(body),
    )
        .into_response()
}
