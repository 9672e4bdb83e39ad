// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChatId, ContactId, MessageId};

/// A conversation thread tied to exactly one contact.
///
/// Invariants maintained by [`Chat::record_message`] and [`Chat::mark_read`]:
/// `last_message` always points at the tail of `message_ids` when the list is
/// non-empty, and `unread_count` is the number of messages recorded since the
/// chat was last read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub contact_id: ContactId,
    pub message_ids: Vec<MessageId>,
    pub last_message: Option<MessageId>,
    pub unread_count: u32,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    #[must_use]
    pub fn new(contact_id: ContactId) -> Self {
        let now = Utc::now();
        Self {
            id: ChatId::generate(),
            contact_id,
            message_ids: Vec::new(),
            last_message: None,
            unread_count: 0,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Message-insertion bookkeeping: append, repoint `last_message`, bump
    /// the unread counter.
    pub fn record_message(&mut self, message_id: MessageId) {
        self.message_ids.push(message_id.clone());
        self.last_message = Some(message_id);
        self.unread_count = self.unread_count.saturating_add(1);
    }

    /// Resets the unread counter. Returns whether anything changed, so
    /// callers can skip the store round-trip on an already-read chat.
    pub fn mark_read(&mut self) -> bool {
        if self.unread_count == 0 {
            return false;
        }
        self.unread_count = 0;
        true
    }
}
