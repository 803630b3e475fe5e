use serde_json::{Value, json};

use roster::{Filter, store::ID_FIELD};

use crate::helpers::{doc, insert, test_store};

#[tokio::test]
async fn test_insert_and_find_by_id() {
    let store = test_store().await;

    let ack = store
        .insert_one("users", doc(json!({"_id": "u1", "email": "a@x.com"})))
        .await
        .unwrap();
    assert!(ack.acknowledged);
    assert_eq!(ack.inserted_id, "u1");

    let found = store
        .find_one("users", &Filter::by_id("u1"))
        .await
        .unwrap()
        .expect("document should exist");
    assert_eq!(found.get("email"), Some(&json!("a@x.com")));
}

#[tokio::test]
async fn test_insert_assigns_id() {
    let store = test_store().await;

    let ack = store
        .insert_one("users", doc(json!({"email": "a@x.com"})))
        .await
        .unwrap();
    assert!(!ack.inserted_id.is_empty());

    let found = store
        .find_one("users", &Filter::eq("email", "a@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.get(ID_FIELD), Some(&Value::String(ack.inserted_id)));
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let store = test_store().await;
    insert(&store, "roles", json!({"_id": "r1"})).await;

    let err = store
        .insert_one("roles", doc(json!({"_id": "r1", "name": "again"})))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    // Same id in a different collection is fine
    insert(&store, "permissions", json!({"_id": "r1"})).await;
}

#[tokio::test]
async fn test_non_string_id_is_rejected() {
    let store = test_store().await;

    let err = store
        .insert_one("users", doc(json!({"_id": 42})))
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
    assert!(store.find_all("users").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_field() {
    let store = test_store().await;
    insert(&store, "users", json!({"_id": "u1", "email": "a@x.com"})).await;
    insert(&store, "users", json!({"_id": "u2", "email": "b@x.com"})).await;

    let found = store
        .find_one("users", &Filter::eq("email", "b@x.com"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.get(ID_FIELD), Some(&json!("u2")));

    let missing = store
        .find_one("users", &Filter::eq("email", "B@x.com"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_any_of_ids() {
    let store = test_store().await;
    for id in ["p1", "p2", "p3"] {
        insert(&store, "permissions", json!({"_id": id})).await;
    }

    let mut ids: Vec<String> = store
        .find("permissions", &Filter::any_of(ID_FIELD, ["p1", "p3", "p9"]))
        .await
        .unwrap()
        .into_iter()
        .map(|d| d[ID_FIELD].as_str().unwrap().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["p1", "p3"]);

    let none = store
        .find("permissions", &Filter::any_of(ID_FIELD, Vec::<String>::new()))
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_find_all_keeps_insertion_order() {
    let store = test_store().await;
    for id in ["c", "a", "b"] {
        insert(&store, "users", json!({"_id": id})).await;
    }

    let ids: Vec<Value> = store
        .find_all("users")
        .await
        .unwrap()
        .into_iter()
        .map(|d| d[ID_FIELD].clone())
        .collect();
    assert_eq!(ids, vec![json!("c"), json!("a"), json!("b")]);
}

#[tokio::test]
async fn test_unknown_collection_is_empty() {
    let store = test_store().await;
    assert!(store.find_all("nothing").await.unwrap().is_empty());
    assert!(
        store
            .find_one("nothing", &Filter::by_id("x"))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_documents_round_trip_nested_values() {
    let store = test_store().await;
    let original = json!({
        "_id": "u1",
        "email": "a@x.com",
        "profile": {"age": 30, "tags": ["x", "y"], "active": true, "score": null}
    });
    insert(&store, "users", original.clone()).await;

    let found = store
        .find_one("users", &Filter::by_id("u1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(Value::Object(found), original);
}
