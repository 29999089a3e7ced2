//! Persistence seam for user records.
//!
//! Email uniqueness is enforced here and nowhere else: `create` reports a
//! duplicate even when two registrations for the same address race.
mod in_memory;
mod postgres;

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::{FullName, User, UserEmail};
use crate::utils::error_chain_fmt;

pub use in_memory::InMemoryUserStore;
pub use postgres::PostgresUserStore;

/// Everything needed to persist a user. There is no way to build one without
/// a password hash.
#[derive(Debug)]
pub struct NewUserRecord {
    pub fullname: FullName,
    pub email: UserEmail,
    pub password_hash: Secret<String>,
}

/// A user together with its password hash, only returned by the explicit
/// credentials lookup.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: Secret<String>,
}

#[derive(thiserror::Error)]
pub enum StoreError {
    #[error("A user with this email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user, assigning its id.
    async fn create(&self, record: NewUserRecord) -> Result<User, StoreError>;

    /// Default read: the user without its password hash.
    ///
    /// Login goes through `find_credentials_by_email` instead; this is the
    /// lookup for every caller that must not see credentials.
    async fn find_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<User>, anyhow::Error>;

    /// Explicit credentials read, the only one that projects the hash in.
    async fn find_credentials_by_email(
        &self,
        email: &UserEmail,
    ) -> Result<Option<StoredCredentials>, anyhow::Error>;
}
