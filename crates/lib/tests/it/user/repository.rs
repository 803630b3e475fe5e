use serde_json::json;

use roster::{
    UserRepository,
    user::{UserError, crypto::verify_password},
};

use crate::helpers::{doc, insert, permission_ids, seeded_repository, test_store};

#[tokio::test]
async fn test_find_by_email_resolves_role_permissions() {
    let users = seeded_repository().await;

    let resolved = users
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(resolved.user.id, "u1");
    assert_eq!(resolved.user.role_id.as_deref(), Some("r1"));
    assert_eq!(permission_ids(&resolved.permissions), vec!["p1", "p2"]);

    let read = resolved
        .permissions
        .iter()
        .find(|p| p.id == "p1")
        .unwrap();
    assert_eq!(read.attributes.get("name"), Some(&json!("read")));
}

#[tokio::test]
async fn test_find_by_email_unknown() {
    let users = seeded_repository().await;
    assert!(users.find_by_email("nouser@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_email_is_exact() {
    let users = seeded_repository().await;
    assert!(users.find_by_email("A@x.com").await.unwrap().is_none());
    assert!(users.find_by_email(" a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_role_without_permissions() {
    let users = seeded_repository().await;
    let resolved = users.find_by_email("b@x.com").await.unwrap().unwrap();
    assert!(resolved.permissions.is_empty());
}

#[tokio::test]
async fn test_dangling_permission_ids_are_skipped() {
    let users = seeded_repository().await;
    let resolved = users.find_by_email("c@x.com").await.unwrap().unwrap();
    assert_eq!(permission_ids(&resolved.permissions), vec!["p3"]);
}

#[tokio::test]
async fn test_missing_role_is_an_integrity_error() {
    let users = seeded_repository().await;

    let err = users.find_by_email("orphan@x.com").await.unwrap_err();
    assert!(err.is_integrity_error());
    assert!(matches!(
        err,
        roster::Error::User(UserError::RoleNotFound { ref role_id }) if role_id == "r404"
    ));
}

#[tokio::test]
async fn test_find_all_returns_users_without_permissions() {
    let users = seeded_repository().await;

    let all = users.find_all().await.unwrap();
    let emails: Vec<&str> = all.iter().filter_map(|u| u.email.as_deref()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com", "orphan@x.com"]);
}

#[tokio::test]
async fn test_find_all_empty_store() {
    let users = UserRepository::new(test_store().await);
    assert!(users.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_all_lists_raw_documents() {
    let store = test_store().await;
    insert(&store, "users", json!({"_id": "u1", "email": "a@x.com", "password": "h", "roleId": "r1"})).await;
    insert(&store, "users", json!({"_id": "bob", "name": "bob"})).await;
    insert(&store, "users", json!({"_id": "z", "email": "z@x.com", "roleId": "r1"})).await;
    let users = UserRepository::new(store);

    let all = users.find_all().await.unwrap();
    let ids: Vec<&str> = all.iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "bob", "z"]);

    assert!(all[1].email.is_none());
    assert_eq!(all[1].attributes.get("name"), Some(&json!("bob")));
    assert_eq!(all[2].email.as_deref(), Some("z@x.com"));
    for user in &all {
        assert!(!user.attributes.contains_key("password"));
    }
}

#[tokio::test]
async fn test_user_without_password_still_resolves() {
    let users = seeded_repository().await;
    users
        .insert_raw(doc(json!({"email": "z@x.com", "roleId": "r1"})))
        .await
        .unwrap();

    let resolved = users.find_by_email("z@x.com").await.unwrap().unwrap();
    assert!(resolved.user.password_hash.is_none());
    assert_eq!(permission_ids(&resolved.permissions), vec!["p1", "p2"]);
}

#[tokio::test]
async fn test_user_without_role_is_an_integrity_error() {
    let users = seeded_repository().await;
    users
        .insert_raw(doc(json!({"_id": "norole", "email": "norole@x.com"})))
        .await
        .unwrap();

    let err = users.find_by_email("norole@x.com").await.unwrap_err();
    assert!(err.is_integrity_error());
    assert!(matches!(
        err,
        roster::Error::User(UserError::RoleMissing { ref user_id }) if user_id == "norole"
    ));
}

#[tokio::test]
async fn test_insert_raw_is_unchecked() {
    let users = seeded_repository().await;

    // Duplicate email, no password, no role: accepted as-is
    let ack = users
        .insert_raw(doc(json!({"email": "a@x.com", "nickname": "dup"})))
        .await
        .unwrap();
    assert!(ack.acknowledged);

    // Lookup returns the first stored match
    let resolved = users.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(resolved.user.id, "u1");
}

#[tokio::test]
async fn test_create_user_hashes_password() {
    let users = seeded_repository().await;

    let ack = users
        .create_user("new@x.com", "hunter2", "r2")
        .await
        .unwrap();

    let resolved = users.find_by_email("new@x.com").await.unwrap().unwrap();
    assert_eq!(resolved.user.id, ack.inserted_id);
    let hash = resolved.user.password_hash.expect("created users have a password");
    assert_ne!(hash, "hunter2");
    assert!(verify_password("hunter2", &hash));
}

#[tokio::test]
async fn test_create_user_rejects_existing_email() {
    let users = seeded_repository().await;

    let err = users
        .create_user("a@x.com", "other", "r2")
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_create_role_and_permission() {
    let users = UserRepository::new(test_store().await);

    let permission = users
        .create_permission(Some("p1"), doc(json!({"name": "read"})))
        .await
        .unwrap();
    assert_eq!(permission.inserted_id, "p1");

    let role = users
        .create_role(None, &["p1".to_string()], doc(json!({"name": "reader"})))
        .await
        .unwrap();
    users
        .create_user("r@x.com", "pw", &role.inserted_id)
        .await
        .unwrap();

    let resolved = users.find_by_email("r@x.com").await.unwrap().unwrap();
    assert_eq!(permission_ids(&resolved.permissions), vec!["p1"]);
}
