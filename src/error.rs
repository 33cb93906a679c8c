//! Error type for forwarded calls and its mapping to inbound responses.
//!
//! # Design Decisions
//! - An upstream failure carries the upstream status and body text; its
//!   display is the body text alone so callers see the upstream's message
//! - Upstream failures surface as 500, mirroring a generic server error
//! - Transport and decode failures are a bad gateway (502)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while forwarding a call to the upstream Items API.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Upstream answered with a status the caller treats as a failure.
    #[error("{body}")]
    Upstream {
        status: StatusCode,
        body: String,
    },

    /// Upstream reported that the requested item does not exist.
    #[error("item not found")]
    NotFound,

    /// Connection or protocol failure talking to upstream.
    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream body was not the expected JSON shape.
    #[error("failed to decode upstream body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Outbound URL could not be built.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for forwarded calls.
pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// Inbound status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { .. } | ProxyError::InvalidUrl(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Transport(_) | ProxyError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(status = %status, error = %self, "Forwarded call failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_displays_body_only() {
        let err = ProxyError::Upstream {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ProxyError::NotFound.status_code(), StatusCode::NOT_FOUND);

        let decode = serde_json::from_str::<crate::Item>("nope").unwrap_err();
        assert_eq!(ProxyError::from(decode).status_code(), StatusCode::BAD_GATEWAY);

        let parse = url::Url::parse("not a url").unwrap_err();
        assert_eq!(
            ProxyError::from(parse).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_uses_mapped_status() {
        let response = ProxyError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
