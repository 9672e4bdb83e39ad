// SPDX-License-Identifier: Apache-2.0

use rusqlite::{params, OptionalExtension};

use parley_model::{ChatId, Message, MessageId};

use crate::error::{map_sqlite_error, StoreError};
use crate::store::{decode_doc, encode_doc, DocumentStore};

impl DocumentStore {
    pub async fn insert_message(&self, message: &Message) -> Result<(), StoreError> {
        let doc = encode_doc("message", message)?;
        let conn = self.conn.lock().await;
        conn.prepare_cached(
            "INSERT INTO messages (id, chat_id, created_at, doc) VALUES (?1, ?2, ?3, ?4)",
        )
        .and_then(|mut stmt| {
            stmt.execute(params![
                message.id.as_str(),
                message.chat_id.as_str(),
                message.created_at.timestamp_micros(),
                doc,
            ])
        })
        .map_err(|e| map_sqlite_error("insert message", &e))?;
        Ok(())
    }

    pub async fn message_by_id(&self, id: &MessageId) -> Result<Option<Message>, StoreError> {
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .prepare_cached("SELECT doc FROM messages WHERE id = ?1")
            .and_then(|mut stmt| {
                stmt.query_row(params![id.as_str()], |row| row.get(0))
                    .optional()
            })
            .map_err(|e| map_sqlite_error("message by id", &e))?;
        doc.map(|d| decode_doc("message", &d)).transpose()
    }

    /// Chronological (oldest first), insertion order breaking ties.
    pub async fn messages_by_chat(&self, chat_id: &ChatId) -> Result<Vec<Message>, StoreError> {
        let conn = self.conn.lock().await;
        let docs: Vec<String> = conn
            .prepare_cached(
                "SELECT doc FROM messages WHERE chat_id = ?1 \
                 ORDER BY created_at ASC, rowid ASC",
            )
            .and_then(|mut stmt| {
                stmt.query_map(params![chat_id.as_str()], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| map_sqlite_error("messages by chat", &e))?;
        docs.iter().map(|d| decode_doc("message", d)).collect()
    }

    /// Newest first, capped at `limit`. Callers re-present ascending.
    pub async fn recent_messages(
        &self,
        chat_id: &ChatId,
        limit: usize,
    ) -> Result<Vec<Message>, StoreError> {
        let conn = self.conn.lock().await;
        let docs: Vec<String> = conn
            .prepare_cached(
                "SELECT doc FROM messages WHERE chat_id = ?1 \
                 ORDER BY created_at DESC, rowid DESC LIMIT ?2",
            )
            .and_then(|mut stmt| {
                stmt.query_map(params![chat_id.as_str(), limit as i64], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| map_sqlite_error("recent messages", &e))?;
        docs.iter().map(|d| decode_doc("message", d)).collect()
    }
}
