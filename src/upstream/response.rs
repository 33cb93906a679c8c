//! Handle to an upstream response whose body has not been consumed yet.
//!
//! Returned directly by the exchange style, and by the retrieve style once
//! its status checks pass. Dropping the handle releases the connection.

use axum::http::{HeaderMap, StatusCode};

use crate::error::{ProxyError, ProxyResult};
use crate::item::Item;
use crate::upstream::codec::{decode_items, ItemStream};

#[derive(Debug)]
pub struct UpstreamResponse {
    inner: reqwest::Response,
}

impl UpstreamResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Decode the body as a single item.
    pub async fn item(self) -> ProxyResult<Item> {
        let bytes = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Decode the body as an array, yielding items as they arrive.
    pub fn items(self) -> ItemStream {
        decode_items(self.inner.bytes_stream())
    }

    /// Read the body as text.
    pub async fn text(self) -> ProxyResult<String> {
        Ok(self.inner.text().await?)
    }

    /// Read and drop the body.
    pub async fn discard(self) -> ProxyResult<()> {
        self.inner.bytes().await?;
        Ok(())
    }

    /// Turn the response into an upstream error carrying its body text.
    pub async fn into_error(self) -> ProxyError {
        let status = self.status();
        match self.text().await {
            Ok(body) => ProxyError::Upstream { status, body },
            Err(e) => e,
        }
    }
}
