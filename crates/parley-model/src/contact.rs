// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ChatId, ContactId};

/// A person record. `chat_id` is back-filled once the contact's chat has
/// been provisioned; a contact without one is "provisioning pending", not
/// an error state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub chat_id: Option<ChatId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Fields are expected to already be validated/normalized.
    #[must_use]
    pub fn new(name: String, email: String, phone: String) -> Self {
        let now = Utc::now();
        Self {
            id: ContactId::generate(),
            name,
            email,
            phone,
            chat_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}
