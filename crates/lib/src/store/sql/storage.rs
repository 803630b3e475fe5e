//! Document storage operations for SQL backends.

use serde_json::Value;

use crate::Result;
use crate::store::{Document, Filter, ID_FIELD, InsertOneResult, StoreError, ensure_id};

use super::{SqlxResultExt, SqlxStore};

/// Decode a stored JSON body.
fn decode(body: &str) -> Result<Document> {
    serde_json::from_str(body).map_err(|e| StoreError::DeserializationFailed { source: e }.into())
}

/// If `filter` only inspects `_id`, returns the identifiers it accepts.
///
/// Identifiers are always strings, so non-string filter values can never match.
fn id_values(filter: &Filter) -> Option<Vec<String>> {
    if filter.field() != ID_FIELD {
        return None;
    }
    let ids = match filter {
        Filter::Eq { value, .. } => value.as_str().map(str::to_string).into_iter().collect(),
        Filter::In { values, .. } => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    };
    Some(ids)
}

/// Scan a whole collection in insertion order.
pub async fn find_all(store: &SqlxStore, collection: &str) -> Result<Vec<Document>> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT body FROM documents WHERE collection = $1 ORDER BY seq")
            .bind(collection.to_string())
            .fetch_all(store.pool())
            .await
            .sql_context("Failed to scan collection")?;

    rows.iter().map(|(body,)| decode(body)).collect()
}

/// Fetch documents by primary key.
async fn find_by_ids(store: &SqlxStore, collection: &str, ids: &[String]) -> Result<Vec<Document>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (0..ids.len())
        .map(|i| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT body FROM documents WHERE collection = $1 AND id IN ({placeholders}) ORDER BY seq"
    );

    let mut query = sqlx::query_as::<_, (String,)>(&sql).bind(collection.to_string());
    for id in ids {
        query = query.bind(id.clone());
    }

    let rows = query
        .fetch_all(store.pool())
        .await
        .sql_context("Failed to look up documents by id")?;

    rows.iter().map(|(body,)| decode(body)).collect()
}

/// Return every document matching `filter`.
pub async fn find(store: &SqlxStore, collection: &str, filter: &Filter) -> Result<Vec<Document>> {
    match id_values(filter) {
        Some(ids) => find_by_ids(store, collection, &ids).await,
        None => Ok(find_all(store, collection)
            .await?
            .into_iter()
            .filter(|doc| filter.matches(doc))
            .collect()),
    }
}

/// Return the first document matching `filter`.
pub async fn find_one(
    store: &SqlxStore,
    collection: &str,
    filter: &Filter,
) -> Result<Option<Document>> {
    Ok(find(store, collection, filter).await?.into_iter().next())
}

/// Insert a document, assigning an `_id` when absent.
pub async fn insert_one(
    store: &SqlxStore,
    collection: &str,
    mut document: Document,
) -> Result<InsertOneResult> {
    let id = ensure_id(collection, &mut document)?;
    let body = serde_json::to_string(&document)
        .map_err(|e| StoreError::SerializationFailed { source: e })?;

    let result = sqlx::query(
        "INSERT INTO documents (collection, id, seq, body)
         VALUES ($1, $2, (SELECT COALESCE(MAX(seq), 0) + 1 FROM documents WHERE collection = $4), $3)",
    )
    .bind(collection.to_string())
    .bind(id.clone())
    .bind(body)
    .bind(collection.to_string())
    .execute(store.pool())
    .await;

    match result {
        Ok(_) => {}
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id,
            }
            .into());
        }
        Err(e) => return Err(e).sql_context("Failed to insert document"),
    }

    tracing::debug!(collection, id = %id, "Inserted document");
    Ok(InsertOneResult {
        acknowledged: true,
        inserted_id: id,
    })
}
