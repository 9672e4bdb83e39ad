// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use parley_model::{Chat, ChatId, ContactId};

use crate::error::{map_sqlite_error, StoreError};
use crate::store::{decode_doc, encode_doc, DocumentStore};

impl DocumentStore {
    /// Fails with a `Conflict` when the contact already has a chat; the
    /// unique index on `contact_id` backs the one-to-one relationship.
    pub async fn insert_chat(&self, chat: &Chat) -> Result<(), StoreError> {
        let doc = encode_doc("chat", chat)?;
        let conn = self.conn.lock().await;
        conn.prepare_cached(
            "INSERT INTO chats (id, contact_id, created_at, updated_at, doc) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .and_then(|mut stmt| {
            stmt.execute(params![
                chat.id.as_str(),
                chat.contact_id.as_str(),
                chat.created_at.timestamp_micros(),
                chat.updated_at.timestamp_micros(),
                doc,
            ])
        })
        .map_err(|e| map_sqlite_error("insert chat contact_id", &e))?;
        Ok(())
    }

    pub async fn chat_by_id(&self, id: &ChatId) -> Result<Option<Chat>, StoreError> {
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .prepare_cached("SELECT doc FROM chats WHERE id = ?1")
            .and_then(|mut stmt| {
                stmt.query_row(params![id.as_str()], |row| row.get(0))
                    .optional()
            })
            .map_err(|e| map_sqlite_error("chat by id", &e))?;
        doc.map(|d| decode_doc("chat", &d)).transpose()
    }

    pub async fn chat_by_contact(
        &self,
        contact_id: &ContactId,
    ) -> Result<Option<Chat>, StoreError> {
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .prepare_cached("SELECT doc FROM chats WHERE contact_id = ?1")
            .and_then(|mut stmt| {
                stmt.query_row(params![contact_id.as_str()], |row| row.get(0))
                    .optional()
            })
            .map_err(|e| map_sqlite_error("chat by contact", &e))?;
        doc.map(|d| decode_doc("chat", &d)).transpose()
    }

    /// Most recently active first.
    pub async fn list_chats(&self) -> Result<Vec<Chat>, StoreError> {
        let conn = self.conn.lock().await;
        let docs: Vec<String> = conn
            .prepare_cached("SELECT doc FROM chats ORDER BY updated_at DESC, rowid DESC")
            .and_then(|mut stmt| {
                stmt.query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| map_sqlite_error("list chats", &e))?;
        docs.iter().map(|d| decode_doc("chat", d)).collect()
    }

    /// Refreshes `updated_at`, then persists the whole document
    /// (last-writer-wins; there is no version token).
    pub async fn update_chat(&self, chat: &mut Chat) -> Result<bool, StoreError> {
        chat.updated_at = Utc::now();
        let doc = encode_doc("chat", chat)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .prepare_cached("UPDATE chats SET updated_at = ?2, doc = ?3 WHERE id = ?1")
            .and_then(|mut stmt| {
                stmt.execute(params![
                    chat.id.as_str(),
                    chat.updated_at.timestamp_micros(),
                    doc,
                ])
            })
            .map_err(|e| map_sqlite_error("update chat", &e))?;
        Ok(changed > 0)
    }

    /// Deletes the chat row only; its messages are left in place.
    pub async fn delete_chat(&self, id: &ChatId) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let deleted = conn
            .prepare_cached("DELETE FROM chats WHERE id = ?1")
            .and_then(|mut stmt| stmt.execute(params![id.as_str()]))
            .map_err(|e| map_sqlite_error("delete chat", &e))?;
        Ok(deleted > 0)
    }
}
