// SPDX-License-Identifier: Apache-2.0

//! Error body and DTO decode contract: every error carries `error` plus an
//! optional `details` payload, and inbound payloads decode from the exact
//! JSON the admin panel sends.

use parley_api::{
    map_error_status, ApiError, CreateContactRequest, CreateMessageRequest, FieldError,
};

#[test]
fn error_wire_shape_is_error_code_details() {
    let err = ApiError::validation_failed(vec![
        FieldError::new("name", "name must be at least 2 characters"),
        FieldError::new("email", "email must contain '@'"),
    ]);
    assert_eq!(map_error_status(&err), 400);

    let v = serde_json::to_value(&err).expect("serialize");
    assert_eq!(v["error"], "validation failed");
    assert_eq!(v["code"], "validation_failed");
    assert_eq!(v["details"].as_array().expect("field errors").len(), 2);

    let back: ApiError = serde_json::from_value(v).expect("deserialize");
    assert_eq!(back, err);
}

#[test]
fn conflict_and_not_found_carry_offending_values() {
    let conflict = ApiError::conflict("email already in use", "email", "ana@x.com");
    assert_eq!(map_error_status(&conflict), 409);
    let v = serde_json::to_value(&conflict).expect("serialize");
    assert_eq!(v["details"]["value"], "ana@x.com");

    let missing = ApiError::not_found("chat", "chatId", "c-404");
    assert_eq!(map_error_status(&missing), 404);
    let v = serde_json::to_value(&missing).expect("serialize");
    assert_eq!(v["error"], "chat not found");
    assert_eq!(v["details"]["chatId"], "c-404");
}

#[test]
fn contact_payload_decodes_from_admin_panel_json() {
    let payload: CreateContactRequest =
        serde_json::from_str(r#"{"name":"Ana","email":"Ana@X.com","phone":"123456789"}"#)
            .expect("decode");
    let fields = payload.validate().expect("valid");
    assert_eq!(fields.email, "ana@x.com");
}

#[test]
fn message_payload_accepts_both_timestamp_encodings() {
    let with_string: CreateMessageRequest = serde_json::from_str(
        r#"{"chatId":"c1","content":"hi","timestamp":"2024-05-01T12:30:00Z"}"#,
    )
    .expect("decode string timestamp");
    let with_millis: CreateMessageRequest =
        serde_json::from_str(r#"{"chatId":"c1","content":"hi","timestamp":1714566600000}"#)
            .expect("decode millis timestamp");

    let a = with_string.validate().expect("valid").timestamp;
    let b = with_millis.validate().expect("valid").timestamp;
    assert_eq!(a, b, "both encodings normalize to the same instant");
}

#[test]
fn unknown_payload_keys_are_tolerated() {
    let payload: CreateContactRequest = serde_json::from_str(
        r#"{"name":"Ana","email":"ana@x.com","phone":"123456789","avatar":"x.png"}"#,
    )
    .expect("decode with extra key");
    assert!(payload.validate().is_ok());
}
