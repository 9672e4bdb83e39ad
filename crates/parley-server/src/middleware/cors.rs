// SPDX-License-Identifier: Apache-2.0

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::AppState;

fn request_origin(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 256)
        .map(ToString::to_string)
}

fn origin_allowed(state: &AppState, origin: &str) -> bool {
    state.api.cors_allowed_origins.iter().any(|x| x == origin)
}

fn put_cors_headers(resp: &mut Response, origin: &str) {
    if let Ok(v) = HeaderValue::from_str(origin) {
        resp.headers_mut().insert("access-control-allow-origin", v);
    }
    resp.headers_mut().insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,PUT,DELETE,OPTIONS"),
    );
    resp.headers_mut().insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,x-request-id"),
    );
}

pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = request_origin(&req);

    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(origin) = origin {
            if origin_allowed(&state, &origin) {
                put_cors_headers(&mut resp, &origin);
            }
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin) = origin {
        if origin_allowed(&state, &origin) {
            put_cors_headers(&mut resp, &origin);
        }
    }
    resp
}
