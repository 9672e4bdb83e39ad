#![forbid(unsafe_code)]
//! Wire-facing types for the parley HTTP API: the error taxonomy and its
//! status mapping, inbound payload validation, and response shaping.

mod dto;
mod error_mapping;
mod errors;
mod responses;

pub use dto::{
    ChatDraft, ContactPatch, CreateChatRequest, CreateContactRequest, CreateMessageRequest,
    MessageDraft, NewContact, UpdateContactRequest,
};
pub use error_mapping::map_error_status;
pub use errors::{ApiError, ApiErrorCode, FieldError};
pub use responses::{ChatDetail, ChatSummary, DeletedResponse};

pub const CRATE_NAME: &str = "parley-api";
