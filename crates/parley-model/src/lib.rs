#![forbid(unsafe_code)]
//! Parley entity model SSOT.
//!
//! Contact, Chat and Message records plus the field validation rules that
//! gate them. Everything here is synchronous and store-independent.

mod chat;
mod contact;
mod ids;
mod message;
pub mod serde_helpers;
mod validate;

pub use chat::Chat;
pub use contact::Contact;
pub use ids::{ChatId, ContactId, MessageId};
pub use message::Message;
pub use validate::{
    normalize_email, parse_content, parse_name, parse_phone, ValidationError, NAME_MIN_LEN,
    PHONE_DIGIT_COUNT,
};

pub const CRATE_NAME: &str = "parley-model";
