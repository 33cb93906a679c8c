//! Inbound route handlers.
//!
//! Each handler makes exactly one upstream call. The `retrieve` handlers let
//! the client enforce status checks; the `exchange` handlers branch on the
//! upstream status themselves before consuming the body.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Response,
    Json,
};

use crate::error::{ProxyError, ProxyResult};
use crate::http::request::request_id;
use crate::http::response::json_array;
use crate::http::server::AppState;
use crate::item::Item;
use crate::upstream::UpstreamResponse;

/// `GET /items/client/retrieve`
pub async fn list_retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ProxyResult<Response> {
    let response = state
        .upstream
        .list()
        .request_id(request_id(&headers))
        .retrieve()
        .await?;

    json_array(response.items()).await
}

/// `GET /items/client/exchange`
pub async fn list_exchange(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ProxyResult<Response> {
    let response = state
        .upstream
        .list()
        .request_id(request_id(&headers))
        .exchange()
        .await?;

    stream_if_success(response).await
}

/// `GET /items/client/retrieve/{id}`
pub async fn get_retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ProxyResult<Json<Item>> {
    let item = state
        .upstream
        .fetch(&id)
        .request_id(request_id(&headers))
        .retrieve()
        .await?
        .item()
        .await?;

    tracing::debug!(id = %id, "Single item retrieved");
    Ok(Json(item))
}

/// `GET /items/client/exchange/{id}`
pub async fn get_exchange(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ProxyResult<Json<Item>> {
    let response = state
        .upstream
        .fetch(&id)
        .request_id(request_id(&headers))
        .exchange()
        .await?;

    let status = response.status();
    if status.is_success() {
        Ok(Json(response.item().await?))
    } else if status == StatusCode::NOT_FOUND {
        response.discard().await?;
        Err(ProxyError::NotFound)
    } else {
        Err(response.into_error().await)
    }
}

/// `POST /items/client`
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(item): Json<Item>,
) -> ProxyResult<Json<Item>> {
    let created = state
        .upstream
        .create(&item)
        .request_id(request_id(&headers))
        .retrieve()
        .await?
        .item()
        .await?;

    tracing::info!(id = ?created.id, "Item created");
    Ok(Json(created))
}

/// `PUT /items/client/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(item): Json<Item>,
) -> ProxyResult<Json<Item>> {
    let updated = state
        .upstream
        .update(&id, &item)
        .request_id(request_id(&headers))
        .retrieve()
        .await?
        .item()
        .await?;

    tracing::info!(id = %id, "Item updated");
    Ok(Json(updated))
}

/// `DELETE /items/client/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ProxyResult<StatusCode> {
    state
        .upstream
        .remove(&id)
        .request_id(request_id(&headers))
        .retrieve()
        .await?
        .discard()
        .await?;

    tracing::info!(id = %id, "Item deleted");
    Ok(StatusCode::OK)
}

/// `GET /items/client/retrieve/exception/occurred`
pub async fn failing_retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ProxyResult<Response> {
    let response = state
        .upstream
        .list_failing()
        .request_id(request_id(&headers))
        .on_status(StatusCode::is_server_error)
        .retrieve()
        .await?;

    json_array(response.items()).await
}

/// `GET /items/client/exchange/exception/occurred`
pub async fn failing_exchange(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ProxyResult<Response> {
    let response = state
        .upstream
        .list_failing()
        .request_id(request_id(&headers))
        .exchange()
        .await?;

    if response.status().is_server_error() {
        let status = response.status();
        let err = response.into_error().await;
        tracing::error!(status = %status, "{}", err);
        return Err(err);
    }

    stream_if_success(response).await
}

async fn stream_if_success(response: UpstreamResponse) -> ProxyResult<Response> {
    if response.status().is_success() {
        json_array(response.items()).await
    } else {
        Err(response.into_error().await)
    }
}
