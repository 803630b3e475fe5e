//! Store creation and utility functions.

use std::{path::PathBuf, sync::Arc};

use roster::store::{DocumentStore, InMemory, SqlxStore};

use crate::cli::{Backend, BackendConfig};

/// File name of the SQLite database inside the data directory
pub const SQLITE_FILE: &str = "roster.db";
/// File name of the in-memory store's JSON snapshot inside the data directory
pub const JSON_FILE: &str = "roster.json";

/// Redact credentials from a PostgreSQL connection URL for safe logging
pub fn redact_postgres_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        "postgres://***@<unparsable-url>".to_string()
    }
}

/// Data directory from the configuration, defaulting to the working directory
pub fn data_dir(config: &BackendConfig) -> PathBuf {
    config
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Create the appropriate store based on configuration
pub async fn create_store(
    config: &BackendConfig,
) -> Result<Arc<dyn DocumentStore>, Box<dyn std::error::Error>> {
    let data_dir = data_dir(config);

    // Ensure data directory exists
    tokio::fs::create_dir_all(&data_dir).await?;

    match config.backend {
        Backend::Sqlite => {
            let db_path = data_dir.join(SQLITE_FILE);
            tracing::info!("Using SQLite backend at {}", db_path.display());
            Ok(Arc::new(SqlxStore::open_sqlite(&db_path).await?))
        }
        Backend::Postgres => {
            let url = config
                .postgres_url
                .as_ref()
                .ok_or("PostgreSQL backend requires --postgres-url or ROSTER_POSTGRES_URL")?;

            let display_url = redact_postgres_url(url);
            tracing::info!("Connecting to PostgreSQL backend at {}", display_url);

            match SqlxStore::connect_postgres(url).await {
                Ok(store) => {
                    tracing::info!("Connected to PostgreSQL successfully");
                    Ok(Arc::new(store))
                }
                Err(e) => {
                    Err(format!("Failed to connect to PostgreSQL at {}: {}", display_url, e).into())
                }
            }
        }
        Backend::Inmemory => {
            let json_path = data_dir.join(JSON_FILE);
            tracing::info!(
                "Using in-memory backend with persistence at {}",
                json_path.display()
            );
            Ok(Arc::new(InMemory::load_from_file(&json_path).await?))
        }
    }
}

/// Persist the store if it only lives in memory. Other backends are durable already.
pub async fn persist_store(
    store: &Arc<dyn DocumentStore>,
    config: &BackendConfig,
) -> roster::Result<()> {
    if let Some(in_memory) = store.as_any().downcast_ref::<InMemory>() {
        in_memory
            .save_to_file(data_dir(config).join(JSON_FILE))
            .await?;
    }
    Ok(())
}
