#![forbid(unsafe_code)]
//! Parley HTTP server: routing, handler glue, and the consistency
//! coordinator that keeps contacts, chats and messages in step.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use parley_store::DocumentStore;

pub mod config;
pub mod coordinator;
pub mod http;
pub mod middleware;
pub mod telemetry;

pub use config::{validate_startup_config, ApiConfig};
pub use telemetry::RequestMetrics;

pub const CRATE_NAME: &str = "parley-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub api: ApiConfig,
    pub metrics: Arc<RequestMetrics>,
    pub request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<DocumentStore>, api: ApiConfig) -> Self {
        Self {
            store,
            api,
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/metrics", get(telemetry::metrics_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route(
            "/v1/contacts",
            post(http::contacts::create_contact_handler).get(http::contacts::list_contacts_handler),
        )
        .route(
            "/v1/contacts/:id",
            get(http::contacts::get_contact_handler)
                .put(http::contacts::update_contact_handler)
                .delete(http::contacts::delete_contact_handler),
        )
        .route(
            "/v1/chats",
            post(http::chats::create_chat_handler).get(http::chats::list_chats_handler),
        )
        .route(
            "/v1/chats/:id",
            get(http::chats::get_chat_handler).delete(http::chats::delete_chat_handler),
        )
        .route(
            "/v1/messages",
            post(http::messages::create_message_handler),
        )
        .route(
            "/v1/messages/chat/:chat_id",
            get(http::messages::chat_messages_handler),
        )
        .layer(from_fn_with_state(
            state.clone(),
            middleware::cors::cors_middleware,
        ))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
