// SPDX-License-Identifier: Apache-2.0

//! Shared handler plumbing plus the operational endpoints.

use std::sync::atomic::Ordering;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::error;

use parley_api::{map_error_status, ApiError};
use parley_store::StoreError;

use crate::AppState;

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error_status(&err))
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err)).into_response()
}

/// Fallback for store failures the call site has not already classified.
pub(crate) fn store_error_response(context: &str, err: &StoreError) -> Response {
    error!(context, error = %err, "store operation failed");
    api_error_response(ApiError::internal(format!("{context}: {err}")))
}

pub(crate) fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_body(&e.to_string()))
}

pub(crate) fn make_request_id(state: &AppState) -> String {
    let id = state.request_id_seed.fetch_add(1, Ordering::Relaxed);
    format!("req-{id:016x}")
}

pub(crate) fn propagated_request_id(headers: &HeaderMap, state: &AppState) -> String {
    if let Some(raw) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    make_request_id(state)
}

pub(crate) fn with_request_id(mut response: Response, request_id: &str) -> Response {
    if let Ok(v) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert("x-request-id", v);
    }
    response
}

/// Terminal step of every handler: record the observation, stamp the id.
pub(crate) async fn finish(
    state: &AppState,
    route: &'static str,
    started: Instant,
    response: Response,
    request_id: &str,
) -> Response {
    state
        .metrics
        .observe_request(route, response.status(), started.elapsed())
        .await;
    with_request_id(response, request_id)
}

pub(crate) async fn healthz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = (StatusCode::OK, "ok").into_response();
    finish(&state, "/healthz", started, resp, &request_id).await
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let resp = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            error!(error = %e, "readiness probe failed");
            (StatusCode::SERVICE_UNAVAILABLE, "not-ready").into_response()
        }
    };
    finish(&state, "/readyz", started, resp, &request_id).await
}

pub(crate) async fn version_handler(State(state): State<AppState>) -> impl IntoResponse {
    let request_id = make_request_id(&state);
    let started = Instant::now();
    let payload = json!({
        "crate": crate::CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": crate::config::CONFIG_SCHEMA_VERSION,
    });
    let resp = Json(payload).into_response();
    finish(&state, "/v1/version", started, resp, &request_id).await
}
