// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use parley_api::{ApiError, CreateMessageRequest};
use parley_model::{ChatId, Message};

use crate::coordinator;
use crate::http::handlers::{
    api_error_response, decode_json, finish, propagated_request_id, store_error_response,
};
use crate::AppState;

pub(crate) async fn create_message_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let payload: CreateMessageRequest = match decode_json(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(e);
            return finish(&state, "/v1/messages", started, resp, &request_id).await;
        }
    };
    let draft = match payload.validate() {
        Ok(v) => v,
        Err(field_errors) => {
            let resp = api_error_response(ApiError::validation_failed(field_errors));
            return finish(&state, "/v1/messages", started, resp, &request_id).await;
        }
    };

    let mut chat = match state.store.chat_by_id(&draft.chat_id).await {
        Ok(Some(chat)) => chat,
        Ok(None) => {
            let resp = api_error_response(ApiError::not_found(
                "chat",
                "chatId",
                draft.chat_id.as_str(),
            ));
            return finish(&state, "/v1/messages", started, resp, &request_id).await;
        }
        Err(e) => {
            let resp = store_error_response("get chat", &e);
            return finish(&state, "/v1/messages", started, resp, &request_id).await;
        }
    };

    let message = Message::new(
        draft.chat_id,
        draft.content,
        coordinator::resolve_direction(draft.is_contact_message),
        draft.timestamp,
    );
    if let Err(e) = state.store.insert_message(&message).await {
        let resp = store_error_response("create message", &e);
        return finish(&state, "/v1/messages", started, resp, &request_id).await;
    }

    // Best-effort bookkeeping; the message stands even if the chat update
    // fails.
    coordinator::record_message(&state.store, &mut chat, &message).await;
    info!(request_id = %request_id, message_id = %message.id, chat_id = %chat.id, "message created");

    let resp = (StatusCode::CREATED, Json(message)).into_response();
    finish(&state, "/v1/messages", started, resp, &request_id).await
}

/// Listing a chat's messages is a mutating read: it resets the chat's
/// unread counter (mark-as-read on view).
pub(crate) async fn chat_messages_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(chat_id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let chat_key = ChatId::from_raw(chat_id.as_str());
    let chat = match state.store.chat_by_id(&chat_key).await {
        Ok(Some(chat)) => chat,
        Ok(None) => {
            let resp = api_error_response(ApiError::not_found("chat", "chatId", &chat_id));
            return finish(
                &state,
                "/v1/messages/chat/{chat_id}",
                started,
                resp,
                &request_id,
            )
            .await;
        }
        Err(e) => {
            let resp = store_error_response("get chat", &e);
            return finish(
                &state,
                "/v1/messages/chat/{chat_id}",
                started,
                resp,
                &request_id,
            )
            .await;
        }
    };

    let messages: Vec<Message> = match state.store.messages_by_chat(&chat.id).await {
        Ok(v) => v,
        Err(e) => {
            let resp = store_error_response("messages by chat", &e);
            return finish(
                &state,
                "/v1/messages/chat/{chat_id}",
                started,
                resp,
                &request_id,
            )
            .await;
        }
    };

    coordinator::mark_read(&state.store, &chat).await;

    let resp = Json(messages).into_response();
    finish(
        &state,
        "/v1/messages/chat/{chat_id}",
        started,
        resp,
        &request_id,
    )
    .await
}
