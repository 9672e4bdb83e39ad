// SPDX-License-Identifier: Apache-2.0

//! Inbound payload types. Fields arrive optional so that a missing field
//! becomes a `FieldError` in the response instead of an opaque decode
//! failure; `validate()` produces the typed draft the handlers work with.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use parley_model::serde_helpers::flexible_timestamp_opt;
use parley_model::{
    normalize_email, parse_content, parse_name, parse_phone, ChatId, ContactId,
};

use crate::FieldError;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validated, normalized contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CreateContactRequest {
    pub fn validate(self) -> Result<NewContact, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = required_field(&mut errors, "name", self.name, parse_name);
        let email = required_field(&mut errors, "email", self.email, normalize_email);
        let phone = required_field(&mut errors, "phone", self.phone, parse_phone);
        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) if errors.is_empty() => Ok(NewContact {
                name,
                email,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Partial update: only the fields present in the payload, each validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

impl UpdateContactRequest {
    pub fn validate(self) -> Result<ContactPatch, Vec<FieldError>> {
        let mut errors = Vec::new();
        let patch = ContactPatch {
            name: optional_field(&mut errors, "name", self.name, parse_name),
            email: optional_field(&mut errors, "email", self.email, normalize_email),
            phone: optional_field(&mut errors, "phone", self.phone, parse_phone),
        };
        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatRequest {
    pub contact_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDraft {
    pub contact_id: ContactId,
}

impl CreateChatRequest {
    pub fn validate(self) -> Result<ChatDraft, Vec<FieldError>> {
        match self.contact_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(ChatDraft {
                contact_id: ContactId::from_raw(id),
            }),
            _ => Err(vec![FieldError::new(
                "contactId",
                "contactId must be a non-empty string",
            )]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub chat_id: Option<String>,
    pub content: Option<String>,
    pub is_contact_message: Option<bool>,
    #[serde(default, deserialize_with = "flexible_timestamp_opt")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Validated message fields. `is_contact_message` stays optional here; the
/// server decides the default for an absent direction flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub chat_id: ChatId,
    pub content: String,
    pub is_contact_message: Option<bool>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl CreateMessageRequest {
    pub fn validate(self) -> Result<MessageDraft, Vec<FieldError>> {
        let mut errors = Vec::new();
        let chat_id = match self.chat_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Some(ChatId::from_raw(id)),
            _ => {
                errors.push(FieldError::new(
                    "chatId",
                    "chatId must be a non-empty string",
                ));
                None
            }
        };
        let content = required_field(&mut errors, "content", self.content, parse_content);
        match (chat_id, content) {
            (Some(chat_id), Some(content)) if errors.is_empty() => Ok(MessageDraft {
                chat_id,
                content,
                is_contact_message: self.is_contact_message,
                timestamp: self.timestamp,
            }),
            _ => Err(errors),
        }
    }
}

fn required_field<F>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<String>,
    parse: F,
) -> Option<String>
where
    F: Fn(&str) -> Result<String, parley_model::ValidationError>,
{
    match value {
        None => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
        Some(raw) => match parse(&raw) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                errors.push(FieldError::new(field, e.to_string()));
                None
            }
        },
    }
}

fn optional_field<F>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<String>,
    parse: F,
) -> Option<String>
where
    F: Fn(&str) -> Result<String, parley_model::ValidationError>,
{
    let raw = value?;
    match parse(&raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}
