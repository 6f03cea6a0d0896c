//! Unit tests for the user service

use std::sync::Arc;

use crate::domain::entities::user::{NewUser, UserPatch};
use crate::errors::DomainError;
use crate::repositories::MockUserRepository;
use crate::services::user::UserService;

fn service() -> UserService<MockUserRepository> {
    UserService::new(Arc::new(MockUserRepository::new()))
}

fn new_user(name: &str, email: &str) -> NewUser {
    NewUser {
        name: name.to_string(),
        email: email.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_fetch() {
    let service = service();
    let created = service
        .create(new_user("Ada", "ada@example.com"))
        .await
        .unwrap();

    let fetched = service.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let service = service();
    service
        .create(new_user("Ada", "ada@example.com"))
        .await
        .unwrap();

    let err = service
        .create(new_user("Impostor", "ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailTaken { .. }));
}

#[tokio::test]
async fn test_patch_keeps_old_values_for_blank_fields() {
    let service = service();
    let created = service
        .create(new_user("Ada", "ada@example.com"))
        .await
        .unwrap();

    let updated = service
        .update(
            created.id,
            UserPatch {
                name: Some("  ".to_string()),
                email: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ada");
    assert_eq!(updated.email, "ada@example.com");
}

#[tokio::test]
async fn test_patch_to_foreign_email_is_rejected() {
    let service = service();
    service
        .create(new_user("Ada", "ada@example.com"))
        .await
        .unwrap();
    let grace = service
        .create(new_user("Grace", "grace@example.com"))
        .await
        .unwrap();

    let err = service
        .update(
            grace.id,
            UserPatch {
                name: None,
                email: Some("ada@example.com".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmailTaken { .. }));
}

#[tokio::test]
async fn test_patch_to_own_email_is_allowed() {
    let service = service();
    let ada = service
        .create(new_user("Ada", "ada@example.com"))
        .await
        .unwrap();

    let updated = service
        .update(
            ada.id,
            UserPatch {
                name: Some("Ada Lovelace".to_string()),
                email: Some("ada@example.com".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
}

#[tokio::test]
async fn test_delete_unknown_user() {
    let service = service();
    let err = service.delete(42).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { resource: "user", .. }));
}

#[tokio::test]
async fn test_get_all_is_id_ascending() {
    let service = service();
    service.create(new_user("Ada", "ada@example.com")).await.unwrap();
    service
        .create(new_user("Grace", "grace@example.com"))
        .await
        .unwrap();

    let all = service.get_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].id < all[1].id);
}
