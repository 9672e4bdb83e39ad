// SPDX-License-Identifier: Apache-2.0

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreErrorCode};
use crate::schema::SCHEMA;

/// SQLite-backed document store. One connection, serialized behind an async
/// mutex; every operation is a single short statement.
pub struct DocumentStore {
    pub(crate) conn: Mutex<Connection>,
}

impl DocumentStore {
    /// Opens (creating if needed) the database at `path` and applies the
    /// schema. `path` comes from the deployment's connection string.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| {
            StoreError::new(StoreErrorCode::Io, format!("open database {path}: {e}"))
        })?;
        Self::with_connection(conn)
    }

    /// Private throwaway database, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("open in-memory: {e}")))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("apply schema: {e}")))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Liveness probe for readiness checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("ping: {e}")))?;
        Ok(())
    }
}

pub(crate) fn decode_doc<T: serde::de::DeserializeOwned>(
    kind: &str,
    doc: &str,
) -> Result<T, StoreError> {
    serde_json::from_str(doc).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Corrupt,
            format!("decode {kind} document: {e}"),
        )
    })
}

pub(crate) fn encode_doc<T: serde::Serialize>(kind: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| {
        StoreError::new(
            StoreErrorCode::Internal,
            format!("encode {kind} document: {e}"),
        )
    })
}
