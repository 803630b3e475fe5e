//! Error types for document store operations.
//!
//! These errors are shared by every `DocumentStore` implementation. Backend-specific
//! failures (SQL driver errors) are carried in dedicated variants so callers can still
//! classify them through the helper methods.

use thiserror::Error;

/// Errors that can occur while reading or writing documents.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document to insert is not a JSON object.
    #[error("Document for collection '{collection}' must be a JSON object")]
    NotAnObject {
        /// Target collection
        collection: String,
    },

    /// Document carries an `_id` that is not a string.
    #[error("Document in collection '{collection}' has a non-string _id: {id}")]
    InvalidId {
        /// Target collection
        collection: String,
        /// The offending `_id` value, rendered as JSON
        id: String,
    },

    /// A document with the same `_id` already exists in the collection.
    #[error("Document with _id '{id}' already exists in collection '{collection}'")]
    DuplicateId {
        /// Target collection
        collection: String,
        /// The duplicated identifier
        id: String,
    },

    /// Stored document could not be decoded into the requested shape.
    #[error("Malformed document in collection '{collection}': {reason}")]
    MalformedDocument {
        /// Collection the document was read from
        collection: String,
        /// Why decoding failed
        reason: String,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    FileIo {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// SQL driver error.
    #[cfg(any(feature = "sqlite", feature = "postgres"))]
    #[error("SQL error: {reason}")]
    SqlxError {
        /// Context for the failed statement
        reason: String,
        /// The underlying sqlx error, if any
        #[source]
        source: Option<sqlx::Error>,
    },
}

impl StoreError {
    /// Check if this error indicates a conflicting write.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::DuplicateId { .. })
    }

    /// Check if this error was caused by the caller's document.
    pub fn is_invalid_document(&self) -> bool {
        matches!(
            self,
            StoreError::NotAnObject { .. } | StoreError::InvalidId { .. }
        )
    }

    /// Check if this error indicates stored data does not have the expected shape.
    pub fn is_integrity_error(&self) -> bool {
        matches!(self, StoreError::MalformedDocument { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            StoreError::FileIo { .. }
                | StoreError::SerializationFailed { .. }
                | StoreError::DeserializationFailed { .. }
        )
    }

    /// Get the collection associated with this error, if any.
    pub fn collection(&self) -> Option<&str> {
        match self {
            StoreError::NotAnObject { collection }
            | StoreError::InvalidId { collection, .. }
            | StoreError::DuplicateId { collection, .. }
            | StoreError::MalformedDocument { collection, .. } => Some(collection),
            _ => None,
        }
    }
}

impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
