// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Conflict,
    Corrupt,
    Io,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::Corrupt => "corrupt_document",
            Self::Io => "io_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.code == StoreErrorCode::Conflict
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// Collapses rusqlite failures into the store taxonomy. Uniqueness
/// violations become `Conflict`; the call site's `context` names the
/// operation and constrained field.
pub(crate) fn map_sqlite_error(context: &str, e: &rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = e {
        if failure.code == rusqlite::ErrorCode::ConstraintViolation {
            return StoreError::new(
                StoreErrorCode::Conflict,
                format!("{context}: uniqueness constraint violated"),
            );
        }
    }
    StoreError::new(StoreErrorCode::Internal, format!("{context}: {e}"))
}
