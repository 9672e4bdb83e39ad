// SPDX-License-Identifier: Apache-2.0

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use parley_model::{Contact, ContactId};

use crate::error::{map_sqlite_error, StoreError};
use crate::store::{decode_doc, encode_doc, DocumentStore};

impl DocumentStore {
    /// Fails with a `Conflict` when another contact already owns the email.
    pub async fn insert_contact(&self, contact: &Contact) -> Result<(), StoreError> {
        let doc = encode_doc("contact", contact)?;
        let conn = self.conn.lock().await;
        conn.prepare_cached(
            "INSERT INTO contacts (id, email, created_at, updated_at, doc) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .and_then(|mut stmt| {
            stmt.execute(params![
                contact.id.as_str(),
                contact.email,
                contact.created_at.timestamp_micros(),
                contact.updated_at.timestamp_micros(),
                doc,
            ])
        })
        .map_err(|e| map_sqlite_error("insert contact email", &e))?;
        Ok(())
    }

    pub async fn contact_by_id(&self, id: &ContactId) -> Result<Option<Contact>, StoreError> {
        let conn = self.conn.lock().await;
        let doc: Option<String> = conn
            .prepare_cached("SELECT doc FROM contacts WHERE id = ?1")
            .and_then(|mut stmt| {
                stmt.query_row(params![id.as_str()], |row| row.get(0))
                    .optional()
            })
            .map_err(|e| map_sqlite_error("contact by id", &e))?;
        doc.map(|d| decode_doc("contact", &d)).transpose()
    }

    /// Newest first.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        let conn = self.conn.lock().await;
        let docs: Vec<String> = conn
            .prepare_cached("SELECT doc FROM contacts ORDER BY created_at DESC, rowid DESC")
            .and_then(|mut stmt| {
                stmt.query_map([], |row| row.get(0))?
                    .collect::<Result<Vec<_>, _>>()
            })
            .map_err(|e| map_sqlite_error("list contacts", &e))?;
        docs.iter().map(|d| decode_doc("contact", d)).collect()
    }

    /// Refreshes `updated_at`, then persists. Returns false when the id no
    /// longer resolves. Email uniqueness is re-checked by the index.
    pub async fn update_contact(&self, contact: &mut Contact) -> Result<bool, StoreError> {
        contact.updated_at = Utc::now();
        let doc = encode_doc("contact", contact)?;
        let conn = self.conn.lock().await;
        let changed = conn
            .prepare_cached(
                "UPDATE contacts SET email = ?2, updated_at = ?3, doc = ?4 WHERE id = ?1",
            )
            .and_then(|mut stmt| {
                stmt.execute(params![
                    contact.id.as_str(),
                    contact.email,
                    contact.updated_at.timestamp_micros(),
                    doc,
                ])
            })
            .map_err(|e| map_sqlite_error("update contact email", &e))?;
        Ok(changed > 0)
    }

    pub async fn delete_contact(&self, id: &ContactId) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let deleted = conn
            .prepare_cached("DELETE FROM contacts WHERE id = ?1")
            .and_then(|mut stmt| stmt.execute(params![id.as_str()]))
            .map_err(|e| map_sqlite_error("delete contact", &e))?;
        Ok(deleted > 0)
    }
}
