// SPDX-License-Identifier: Apache-2.0

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use parley_api::{
    ApiError, CreateContactRequest, DeletedResponse, UpdateContactRequest,
};
use parley_model::{Contact, ContactId};

use crate::coordinator;
use crate::http::handlers::{
    api_error_response, decode_json, finish, propagated_request_id, store_error_response,
};
use crate::AppState;

pub(crate) async fn create_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let payload: CreateContactRequest = match decode_json(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(e);
            return finish(&state, "/v1/contacts", started, resp, &request_id).await;
        }
    };
    let fields = match payload.validate() {
        Ok(v) => v,
        Err(field_errors) => {
            let resp = api_error_response(ApiError::validation_failed(field_errors));
            return finish(&state, "/v1/contacts", started, resp, &request_id).await;
        }
    };

    let mut contact = Contact::new(fields.name, fields.email, fields.phone);
    if let Err(e) = state.store.insert_contact(&contact).await {
        let resp = if e.is_conflict() {
            api_error_response(ApiError::conflict(
                "email already in use",
                "email",
                &contact.email,
            ))
        } else {
            store_error_response("create contact", &e)
        };
        return finish(&state, "/v1/contacts", started, resp, &request_id).await;
    }

    // Best-effort side effect; the contact stands even if this fails.
    coordinator::provision_chat(&state.store, &mut contact).await;
    info!(request_id = %request_id, contact_id = %contact.id, "contact created");

    let resp = (StatusCode::CREATED, Json(contact)).into_response();
    finish(&state, "/v1/contacts", started, resp, &request_id).await
}

pub(crate) async fn list_contacts_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let resp = match state.store.list_contacts().await {
        Ok(contacts) => Json(contacts).into_response(),
        Err(e) => store_error_response("list contacts", &e),
    };
    finish(&state, "/v1/contacts", started, resp, &request_id).await
}

pub(crate) async fn get_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let contact_id = ContactId::from_raw(id.as_str());
    let resp = match state.store.contact_by_id(&contact_id).await {
        Ok(Some(contact)) => Json(contact).into_response(),
        Ok(None) => api_error_response(ApiError::not_found("contact", "id", &id)),
        Err(e) => store_error_response("get contact", &e),
    };
    finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await
}

pub(crate) async fn update_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let payload: UpdateContactRequest = match decode_json(&body) {
        Ok(v) => v,
        Err(e) => {
            let resp = api_error_response(e);
            return finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await;
        }
    };
    let patch = match payload.validate() {
        Ok(v) => v,
        Err(field_errors) => {
            let resp = api_error_response(ApiError::validation_failed(field_errors));
            return finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await;
        }
    };

    let contact_id = ContactId::from_raw(id.as_str());
    let mut contact = match state.store.contact_by_id(&contact_id).await {
        Ok(Some(contact)) => contact,
        Ok(None) => {
            let resp = api_error_response(ApiError::not_found("contact", "id", &id));
            return finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await;
        }
        Err(e) => {
            let resp = store_error_response("get contact", &e);
            return finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await;
        }
    };

    if let Some(name) = patch.name {
        contact.name = name;
    }
    if let Some(email) = patch.email {
        contact.email = email;
    }
    if let Some(phone) = patch.phone {
        contact.phone = phone;
    }

    let resp = match state.store.update_contact(&mut contact).await {
        Ok(true) => Json(contact).into_response(),
        Ok(false) => api_error_response(ApiError::not_found("contact", "id", &id)),
        Err(e) if e.is_conflict() => api_error_response(ApiError::conflict(
            "email already in use",
            "email",
            &contact.email,
        )),
        Err(e) => store_error_response("update contact", &e),
    };
    finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await
}

pub(crate) async fn delete_contact_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let started = Instant::now();
    let request_id = propagated_request_id(&headers, &state);
    let contact_id = ContactId::from_raw(id.as_str());
    // No cascade: the contact's chat (and its messages) stay behind.
    let resp = match state.store.delete_contact(&contact_id).await {
        Ok(true) => {
            info!(request_id = %request_id, contact_id = %id, "contact deleted");
            Json(DeletedResponse::new(id.clone())).into_response()
        }
        Ok(false) => api_error_response(ApiError::not_found("contact", "id", &id)),
        Err(e) => store_error_response("delete contact", &e),
    };
    finish(&state, "/v1/contacts/{id}", started, resp, &request_id).await
}
