// SPDX-License-Identifier: Apache-2.0

//! Read-path projections. Chats go over the wire with their contact and
//! last-message references resolved into full records; the join is
//! read-only and never persisted back.

use chrono::{DateTime, Utc};
use serde::Serialize;

use parley_model::{Chat, ChatId, Contact, Message, MessageId};

/// Chat listing row: `contactId` and `lastMessage` carry the resolved
/// records (or null when the reference no longer resolves).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: ChatId,
    pub contact_id: Option<Contact>,
    pub message_ids: Vec<MessageId>,
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSummary {
    #[must_use]
    pub fn project(chat: Chat, contact: Option<Contact>, last_message: Option<Message>) -> Self {
        Self {
            id: chat.id,
            contact_id: contact,
            message_ids: chat.message_ids,
            last_message,
            unread_count: chat.unread_count,
            is_archived: chat.is_archived,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

/// Single-chat fetch: the summary plus the most recent window of messages,
/// presented in chronological order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDetail {
    #[serde(flatten)]
    pub summary: ChatSummary,
    pub messages: Vec<Message>,
}

impl ChatDetail {
    /// `recent` is expected newest-first straight from the store; it is
    /// re-presented oldest-first here.
    #[must_use]
    pub fn project(
        chat: Chat,
        contact: Option<Contact>,
        last_message: Option<Message>,
        mut recent: Vec<Message>,
    ) -> Self {
        recent.reverse();
        Self {
            summary: ChatSummary::project(chat, contact, last_message),
            messages: recent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

impl DeletedResponse {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            deleted: true,
        }
    }
}
