use async_trait::async_trait;
use std::sync::Arc;

use userauth::domain::{User, UserEmail};
use userauth::user_store::{
    NewUserRecord, StoreError, StoredCredentials, UserStore,
};

use crate::helpers::{jane_registration, spawn_app_with_store};

const DB_FAILURE: &str = "connection refused: secret-db-host:5432";

/// Fails every call the way an unreachable database would.
struct UnreachableUserStore;

#[async_trait]
impl UserStore for UnreachableUserStore {
    async fn create(&self, _record: NewUserRecord) -> Result<User, StoreError> {
        Err(StoreError::UnexpectedError(anyhow::anyhow!(DB_FAILURE)))
    }

    async fn find_by_email(
        &self,
        _email: &UserEmail,
    ) -> Result<Option<User>, anyhow::Error> {
        Err(anyhow::anyhow!(DB_FAILURE))
    }

    async fn find_credentials_by_email(
        &self,
        _email: &UserEmail,
    ) -> Result<Option<StoredCredentials>, anyhow::Error> {
        Err(anyhow::anyhow!(DB_FAILURE))
    }
}

async fn assert_opaque_internal_error(response: reqwest::Response) {
    assert_eq!(500, response.status().as_u16());
    let body = response.text().await.expect("Failed to read body.");
    assert!(!body.contains("secret-db-host"), "leaked: {}", body);
    let json: serde_json::Value =
        serde_json::from_str(&body).expect("Body is not JSON.");
    assert_eq!(json, serde_json::json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn register_returns_an_opaque_500_when_the_store_fails() {
    // Arrange
    let app = spawn_app_with_store(Arc::new(UnreachableUserStore)).await;

    // Act
    let response = app.post_register(&jane_registration()).await;

    // Assert
    assert_opaque_internal_error(response).await;
}

#[tokio::test]
async fn login_returns_an_opaque_500_when_the_store_fails() {
    // Arrange
    let app = spawn_app_with_store(Arc::new(UnreachableUserStore)).await;

    // Act
    let response = app
        .post_login(&serde_json::json!({
            "email": "jane@x.com",
            "password": "secret123"
        }))
        .await;

    // Assert
    assert_opaque_internal_error(response).await;
}
