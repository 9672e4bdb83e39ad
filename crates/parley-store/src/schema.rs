// SPDX-License-Identifier: Apache-2.0

/// Idempotent DDL, applied at every open.
///
/// `contacts.email` and `chats.contact_id` carry unique indexes: the first
/// backs the one-contact-per-email rule, the second makes the implicit
/// one-to-one contact/chat relationship a store-level constraint instead of
/// an application-only convention. Sort columns are epoch microseconds so
/// `ORDER BY` is exact.
pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    doc TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email);
CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at);

CREATE TABLE IF NOT EXISTS chats (
    id TEXT PRIMARY KEY,
    contact_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    doc TEXT NOT NULL
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_chats_contact ON chats(contact_id);
CREATE INDEX IF NOT EXISTS idx_chats_updated ON chats(updated_at);

CREATE TABLE IF NOT EXISTS messages (
    id TEXT PRIMARY KEY,
    chat_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    doc TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_messages_chat_created ON messages(chat_id, created_at);
";
