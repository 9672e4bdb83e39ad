// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{info, warn};

use parley_api::{ApiError, ChatDetail, ChatSummary, CreateChatRequest, DeletedResponse};
use parley_model::{Chat, ChatId, Message};

use crate::coordinator;
use crate::http::handlers::{
    api_error_response, decode_json, finish, propagated_request_id, store_error_response,
};
use crate::AppState;

pub(crate) async fn create_chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let payload: CreateChatRequest = match decode_json(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(e);
            return finish(&state, "/v1/chats", started, resp, &request_id).await;
        }
    };
    let draft = match payload.validate() {
        Ok(v) => v,
        Err(field_errors) => {
            let resp = api_error_response(ApiError::validation_failed(field_errors));
            return finish(&state, "/v1/chats", started, resp, &request_id).await;
        }
    };

    let mut contact = match state.store.contact_by_id(&draft.contact_id).await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            let resp = api_error_response(ApiError::not_found(
                "contact",
                "contactId",
                draft.contact_id.as_str(),
            ));
            return finish(&state, "/v1/chats", started, resp, &request_id).await;
        }
        Err(e) => {
            let resp = store_error_response("get contact", &e);
            return finish(&state, "/v1/chats", started, resp, &request_id).await;
        }
    };

    let chat = Chat::new(contact.id.clone());
    if let Err(e) = state.store.insert_chat(&chat).await {
        let resp = if e.is_conflict() {
            api_error_response(ApiError::conflict(
                "chat already exists for contact",
                "contactId",
                contact.id.as_str(),
            ))
        } else {
            store_error_response("create chat", &e)
        };
        return finish(&state, "/v1/chats", started, resp, &request_id).await;
    }

    // Keep the contact's back-reference in step when it was still unset.
    if contact.chat_id.is_none() {
        contact.chat_id = Some(chat.id.clone());
        if let Err(e) = state.store.update_contact(&mut contact).await {
            warn!(contact_id = %contact.id, chat_id = %chat.id, error = %e, "chat back-reference write failed");
        }
    }
    info!(request_id = %request_id, chat_id = %chat.id, contact_id = %contact.id, "chat created");

    let resp = (StatusCode::CREATED, Json(chat)).into_response();
    finish(&state, "/v1/chats", started, resp, &request_id).await
}

pub(crate) async fn list_chats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let chats = match state.store.list_chats().await {
        Ok(chats) => chats,
        Err(e) => {
            let resp = store_error_response("list chats", &e);
            return finish(&state, "/v1/chats", started, resp, &request_id).await;
        }
    };

    let mut summaries = Vec::with_capacity(chats.len());
    for chat in chats {
        let (contact, last_message) = match resolve_references(&state, &chat).await {
            Ok(v) => v,
            Err(resp) => return finish(&state, "/v1/chats", started, resp, &request_id).await,
        };
        summaries.push(ChatSummary::project(chat, contact, last_message));
    }

    let resp = Json(summaries).into_response();
    finish(&state, "/v1/chats", started, resp, &request_id).await
}

/// Fetching a chat is a mutating read: the returned document carries the
/// unread count as it was, and the counter is then reset to zero
/// (mark-as-read on view).
pub(crate) async fn get_chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let chat_id = ChatId::from_raw(id.as_str());
    let chat = match state.store.chat_by_id(&chat_id).await {
        Ok(Some(chat)) => chat,
        Ok(None) => {
            let resp = api_error_response(ApiError::not_found("chat", "id", &id));
            return finish(&state, "/v1/chats/{id}", started, resp, &request_id).await;
        }
        Err(e) => {
            let resp = store_error_response("get chat", &e);
            return finish(&state, "/v1/chats/{id}", started, resp, &request_id).await;
        }
    };

    let (contact, last_message) = match resolve_references(&state, &chat).await {
        Ok(v) => v,
        Err(resp) => return finish(&state, "/v1/chats/{id}", started, resp, &request_id).await,
    };
    let recent = match state
        .store
        .recent_messages(&chat.id, state.api.recent_messages_limit)
        .await
    {
        Ok(v) => v,
        Err(e) => {
            let resp = store_error_response("recent messages", &e);
            return finish(&state, "/v1/chats/{id}", started, resp, &request_id).await;
        }
    };

    coordinator::mark_read(&state.store, &chat).await;

    let resp = Json(ChatDetail::project(chat, contact, last_message, recent)).into_response();
    finish(&state, "/v1/chats/{id}", started, resp, &request_id).await
}

pub(crate) async fn delete_chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let chat_id = ChatId::from_raw(id.as_str());
    // Messages are not cascade-deleted; the chat row alone goes.
    let resp = match state.store.delete_chat(&chat_id).await {
        Ok(true) => {
            info!(request_id = %request_id, chat_id = %id, "chat deleted");
            Json(DeletedResponse::new(id.clone())).into_response()
        }
        Ok(false) => api_error_response(ApiError::not_found("chat", "id", &id)),
        Err(e) => store_error_response("delete chat", &e),
    };
    finish(&state, "/v1/chats/{id}", started, resp, &request_id).await
}

/// Read-only join: the chat's contact and last-message references resolved
/// to full records, nulls when they no longer exist.
async fn resolve_references(
    state: &AppState,
    chat: &Chat,
) -> Result<(Option<parley_model::Contact>, Option<Message>), Response> {
    let contact = state
        .store
        .contact_by_id(&chat.contact_id)
        .await
        .map_err(|e| store_error_response("resolve chat contact", &e))?;
    let last_message = match &chat.last_message {
        Some(message_id) => state
            .store
            .message_by_id(message_id)
            .await
            .map_err(|e| store_error_response("resolve last message", &e))?,
        None => None,
    };
    Ok((contact, last_message))
}
