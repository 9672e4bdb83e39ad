// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    NotFound,
    Conflict,
    Internal,
}

/// One field-level validation failure, surfaced in `details`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Wire shape: `{"error": <summary>, "code": <code>, "details": ...}` with
/// `details` omitted when there is nothing useful to attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    #[serde(rename = "error")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn validation_failed(field_errors: Vec<FieldError>) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!(field_errors),
        )
    }

    #[must_use]
    pub fn invalid_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "invalid request body",
            json!(reason),
        )
    }

    #[must_use]
    pub fn not_found(what: &str, detail_field: &str, id: &str) -> Self {
        Self::new(
            ApiErrorCode::NotFound,
            format!("{what} not found"),
            json!({ detail_field: id }),
        )
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>, field: &str, value: &str) -> Self {
        Self::new(
            ApiErrorCode::Conflict,
            message,
            json!({"field": field, "value": value}),
        )
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message, Value::Null)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
