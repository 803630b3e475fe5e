//! Document storage for Roster
//!
//! This module provides the `DocumentStore` trait and its implementations.
//! A store holds named collections of JSON documents. Each document is a JSON
//! object identified by a string `_id` field, assigned on insert when absent.
//!
//! The trait deliberately exposes only what the user directory needs:
//! point lookups by field, set-membership lookups, unfiltered scans and an
//! unchecked insert.

use std::any::Any;

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::Result;

mod in_memory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod sql;

pub mod errors;

pub use errors::StoreError;
pub use in_memory::InMemory;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use sql::{DbKind, SqlxStore};

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// A stored JSON document.
pub type Document = serde_json::Map<String, Value>;

/// Selects documents by the value of a single top-level field.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals the given value.
    Eq {
        /// Field name
        field: String,
        /// Required value
        value: Value,
    },
    /// Field equals any of the given values.
    In {
        /// Field name
        field: String,
        /// Accepted values
        values: Vec<Value>,
    },
}

impl Filter {
    /// Match documents whose `field` equals `value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Match documents whose `field` equals one of `values`.
    pub fn any_of<V: Into<Value>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Match a document by its `_id`.
    pub fn by_id(id: impl Into<String>) -> Self {
        Filter::eq(ID_FIELD, id.into())
    }

    /// The field this filter inspects.
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq { field, .. } | Filter::In { field, .. } => field,
        }
    }

    /// Whether `document` satisfies this filter.
    ///
    /// A missing field never matches.
    pub fn matches(&self, document: &Document) -> bool {
        let Some(actual) = document.get(self.field()) else {
            return false;
        };
        match self {
            Filter::Eq { value, .. } => actual == value,
            Filter::In { values, .. } => values.contains(actual),
        }
    }
}

/// Acknowledgment returned by `DocumentStore::insert_one`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    /// Always `true` once the write is durable in the backend.
    pub acknowledged: bool,
    /// The `_id` of the inserted document.
    pub inserted_id: String,
}

/// Storage trait for JSON document collections.
///
/// Implementations must be `Send` and `Sync` so a single store can be shared
/// across request handlers, and implement `Any` to allow downcasting (for example
/// to persist an `InMemory` store on shutdown).
#[async_trait]
pub trait DocumentStore: Send + Sync + Any {
    /// Returns the first document in `collection` matching `filter`, if any.
    async fn find_one(&self, collection: &str, filter: &Filter) -> Result<Option<Document>>;

    /// Returns every document in `collection` matching `filter`.
    async fn find(&self, collection: &str, filter: &Filter) -> Result<Vec<Document>>;

    /// Returns every document in `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Inserts `document` into `collection` without validating its contents.
    ///
    /// Assigns a fresh `_id` when the document has none. Fails with
    /// `StoreError::DuplicateId` if the `_id` is already taken.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertOneResult>;

    /// Short name of the backend, used by health reporting.
    fn kind(&self) -> &'static str;

    /// Returns a reference to the store as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Decodes a stored document into a typed record.
///
/// Fails with `StoreError::MalformedDocument` when the document does not have
/// the expected shape.
pub fn from_document<T: DeserializeOwned>(collection: &str, document: Document) -> Result<T> {
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        StoreError::MalformedDocument {
            collection: collection.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Encodes a typed record as a document.
pub fn to_document<T: Serialize>(record: &T) -> Result<Document> {
    match serde_json::to_value(record).map_err(|e| StoreError::SerializationFailed { source: e })? {
        Value::Object(document) => Ok(document),
        _ => Err(StoreError::SerializationFailed {
            source: serde::ser::Error::custom("record did not serialize to a JSON object"),
        }
        .into()),
    }
}

/// Reads the `_id` of `document`, assigning a new UUID when it is absent.
pub(crate) fn ensure_id(collection: &str, document: &mut Document) -> Result<String> {
    match document.get(ID_FIELD) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Err(StoreError::InvalidId {
            collection: collection.to_string(),
            id: other.to_string(),
        }
        .into()),
        None => {
            let id = uuid::Uuid::new_v4().to_string();
            document.insert(ID_FIELD.to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}
