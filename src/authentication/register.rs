use anyhow::Context;
use serde::Serialize;

use crate::authentication::CredentialService;
use crate::domain::{NewUser, User};
use crate::user_store::{NewUserRecord, StoreError, UserStore};
use crate::utils::error_chain_fmt;

/// What a successful registration or login hands back to the client.
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: User,
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("A user with this email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Hash the password, persist the user and issue a session token.
///
/// There is no existence pre-check: the store's uniqueness constraint decides
/// whether the email is taken.
#[tracing::instrument(
    name = "Register a new user",
    skip_all,
    fields(user_email = %new_user.email, user_id = tracing::field::Empty)
)]
pub async fn register_user(
    new_user: NewUser,
    store: &dyn UserStore,
    credentials: &CredentialService,
) -> Result<AuthenticatedUser, RegisterError> {
    let NewUser {
        fullname,
        email,
        password,
    } = new_user;

    let password_hash = credentials
        .hash_password(password.into_secret())
        .await
        .context("Failed to hash the new user's password.")?;

    let user = store
        .create(NewUserRecord {
            fullname,
            email,
            password_hash,
        })
        .await
        .map_err(|e| match e {
            StoreError::DuplicateEmail => RegisterError::DuplicateEmail,
            StoreError::UnexpectedError(e) => RegisterError::UnexpectedError(e),
        })?;
    tracing::Span::current()
        .record("user_id", &tracing::field::display(&user.id));

    let token = credentials
        .issue_token(&user.id, &user.email)
        .context("Failed to issue a session token.")?;

    Ok(AuthenticatedUser { token, user })
}
