use std::sync::Arc;

use serde_json::{Value, json};

use roster::{
    Document, DocumentStore, UserRepository,
    store::InMemory,
    user::crypto::hash_password,
};

// ==========================
// CORE TEST FACTORIES
// ==========================
// Single point of change for backend matrix testing via TEST_BACKEND env var.

/// Creates a test store based on TEST_BACKEND env var.
///
/// Supported values:
/// - "inmemory" or unset: InMemory store (default)
/// - "sqlite": SQLite in-memory store (requires `sqlite` feature)
/// - "postgres": PostgreSQL store in an isolated schema (requires `postgres` feature and TEST_POSTGRES_URL)
///
/// # Example
/// ```bash
/// # Run tests with InMemory (default)
/// cargo test
///
/// # Run tests with SQLite
/// TEST_BACKEND=sqlite cargo test --features sqlite
///
/// # Run tests with PostgreSQL
/// TEST_BACKEND=postgres TEST_POSTGRES_URL="postgres://localhost/roster_test" \
///   cargo test --features postgres
/// ```
pub async fn test_store() -> Arc<dyn DocumentStore> {
    match std::env::var("TEST_BACKEND").as_deref() {
        Ok("sqlite") => {
            #[cfg(feature = "sqlite")]
            {
                Arc::new(
                    roster::store::SqlxStore::sqlite_in_memory()
                        .await
                        .expect("Failed to create SQLite store"),
                )
            }
            #[cfg(not(feature = "sqlite"))]
            {
                panic!("TEST_BACKEND=sqlite requires the 'sqlite' feature to be enabled")
            }
        }
        Ok("postgres") => {
            #[cfg(feature = "postgres")]
            {
                let url = std::env::var("TEST_POSTGRES_URL")
                    .unwrap_or_else(|_| "postgres://localhost/roster_test".to_string());
                Arc::new(
                    roster::store::SqlxStore::connect_postgres_isolated(&url)
                        .await
                        .expect("Failed to connect to PostgreSQL"),
                )
            }
            #[cfg(not(feature = "postgres"))]
            {
                panic!("TEST_BACKEND=postgres requires the 'postgres' feature to be enabled")
            }
        }
        Ok("inmemory") | Err(_) => Arc::new(InMemory::new()),
        Ok(other) => panic!("Unknown TEST_BACKEND '{other}'"),
    }
}

/// Converts a JSON object literal into a document.
pub fn doc(value: Value) -> Document {
    match value {
        Value::Object(document) => document,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Inserts `value` into `collection`, panicking on failure.
pub async fn insert(store: &Arc<dyn DocumentStore>, collection: &str, value: Value) -> String {
    store
        .insert_one(collection, doc(value))
        .await
        .expect("insert should succeed")
        .inserted_id
}

// ==========================
// DIRECTORY FIXTURES
// ==========================

/// Password of every seeded user.
pub const PASSWORD: &str = "secret";

/// Seeds the standard directory:
///
/// - permissions `p1`, `p2`, `p3`
/// - role `r1` granting `p1` and `p2`; role `r2` granting nothing; role `r3` granting `p3` and a missing `p9`
/// - user `a@x.com` with role `r1`; `b@x.com` with role `r2`; `c@x.com` with role `r3`
/// - user `orphan@x.com` whose role `r404` does not exist
pub async fn seed_directory(store: &Arc<dyn DocumentStore>) {
    for (id, name) in [("p1", "read"), ("p2", "write"), ("p3", "admin")] {
        insert(store, "permissions", json!({"_id": id, "name": name})).await;
    }

    insert(store, "roles", json!({"_id": "r1", "name": "editor", "permissions": ["p1", "p2"]})).await;
    insert(store, "roles", json!({"_id": "r2", "name": "guest", "permissions": []})).await;
    insert(store, "roles", json!({"_id": "r3", "name": "partial", "permissions": ["p3", "p9"]})).await;

    let hash = hash_password(PASSWORD).expect("hashing should succeed");
    for (id, email, role) in [
        ("u1", "a@x.com", "r1"),
        ("u2", "b@x.com", "r2"),
        ("u3", "c@x.com", "r3"),
        ("u4", "orphan@x.com", "r404"),
    ] {
        insert(
            store,
            "users",
            json!({"_id": id, "email": email, "password": hash, "roleId": role}),
        )
        .await;
    }
}

/// A fresh store with the standard directory and a repository over it.
pub async fn seeded_repository() -> UserRepository {
    let store = test_store().await;
    seed_directory(&store).await;
    UserRepository::new(store)
}

/// Sorted identifiers of the given permissions.
pub fn permission_ids(permissions: &[roster::user::Permission]) -> Vec<String> {
    let mut ids: Vec<String> = permissions.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}
