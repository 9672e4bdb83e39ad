use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChatId, MessageId};

/// A single unit of conversation content. `chat_id` and `timestamp` are
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub content: String,
    pub is_contact_message: bool,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// `timestamp` is the logical message time; when the caller supplies
    /// none it defaults to the creation instant.
    #[must_use]
    pub fn new(
        chat_id: ChatId,
        content: String,
        is_contact_message: bool,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: MessageId::generate(),
            chat_id,
            content,
            is_contact_message,
            timestamp: timestamp.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }
}
