use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::{User, UserEmail, UserId};
use crate::user_store::{
    NewUserRecord, StoreError, StoredCredentials, UserStore,
};

/// Process-local store keyed by the normalised email.
///
/// The uniqueness check and the insert happen under the same write lock, so
/// concurrent registrations for one address resolve to a single winner.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, StoredCredentials>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    #[tracing::instrument(name = "Saving new user in memory", skip_all)]
    async fn create(&self, record: NewUserRecord) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        let key = record.email.as_ref().to_string();
        if users.contains_key(&key) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: UserId::generate(),
            fullname: record.fullname,
            email: record.email,
            socket_id: None,
        };
        users.insert(
            key,
            StoredCredentials {
                user: user.clone(),
                password_hash: record.password_hash,
            },
        );
        Ok(user)
    }

    async fn find_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<User>, anyhow::Error> {
        let users = self.users.read().await;
        Ok(users.get(email.as_ref()).map(|c| c.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<StoredCredentials>, anyhow::Error> {
        let users = self.users.read().await;
        Ok(users.get(email.as_ref()).cloned())
    }
}
