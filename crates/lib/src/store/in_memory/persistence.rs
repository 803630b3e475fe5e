//! Persistence operations for the InMemory store
//!
//! This module handles serialization and file I/O for saving/loading
//! the in-memory collections to/from JSON files.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tokio::sync::RwLock;

use super::InMemory;
use crate::{
    Result,
    store::{Document, StoreError},
};

/// The current persistence file format version.
/// v0 indicates this is an unstable format subject to breaking changes.
const PERSISTENCE_VERSION: u8 = 0;

/// Helper to check if version is default (0) for serde skip_serializing_if
fn is_v0(v: &u8) -> bool {
    *v == 0
}

/// Validates the persistence version during deserialization.
fn validate_persistence_version<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let version = u8::deserialize(deserializer)?;
    if version != PERSISTENCE_VERSION {
        return Err(serde::de::Error::custom(format!(
            "unsupported persistence version {version}; only version {PERSISTENCE_VERSION} is supported"
        )));
    }
    Ok(version)
}

/// Serializable snapshot of an InMemory store
#[derive(Serialize, Deserialize)]
struct SerializableStore {
    /// File format version for compatibility checking
    #[serde(
        rename = "_v",
        default,
        skip_serializing_if = "is_v0",
        deserialize_with = "validate_persistence_version"
    )]
    version: u8,
    #[serde(default)]
    collections: HashMap<String, Vec<Document>>,
}

impl InMemory {
    /// Saves every collection to `path` as JSON.
    ///
    /// The write goes to a sibling temporary file first and is then renamed
    /// over the target, so a crash never leaves a truncated file behind.
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let snapshot = SerializableStore {
            version: PERSISTENCE_VERSION,
            collections: self.collections.read().await.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| StoreError::SerializationFailed { source: e })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| StoreError::FileIo { source: e })?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| StoreError::FileIo { source: e })?;

        tracing::info!(path = %path.display(), "Saved in-memory store");
        Ok(())
    }

    /// Loads a store previously written by `save_to_file`.
    ///
    /// A missing file yields an empty store.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = match tokio::fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(StoreError::FileIo { source: e }.into()),
        };

        let snapshot: SerializableStore = serde_json::from_str(&json)
            .map_err(|e| StoreError::DeserializationFailed { source: e })?;

        Ok(Self {
            collections: RwLock::new(snapshot.collections),
        })
    }
}
