use anyhow::Context;
use secrecy::Secret;

use crate::authentication::{AuthenticatedUser, CredentialService};
use crate::domain::{LoginCredentials, User};
use crate::user_store::UserStore;
use crate::utils::error_chain_fmt;

// Verified against when the email is unknown, so both failure paths pay for
// one Argon2 computation.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$\
gZiV/M1gPc22ElAH/Jh1Hw$\
CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Resolve login credentials to the user they belong to.
///
/// An unknown email and a wrong password fail the same way.
#[tracing::instrument(name = "Validate credentials", skip_all)]
pub async fn validate_credentials(
    credentials: LoginCredentials,
    store: &dyn UserStore,
    credential_service: &CredentialService,
) -> Result<User, AuthError> {
    let LoginCredentials { email, password } = credentials;

    let (user, expected_password_hash) = match store
        .find_credentials_by_email(&email)
        .await
        .context("Failed to retrieve stored credentials.")?
    {
        Some(stored) => (Some(stored.user), stored.password_hash),
        None => (None, Secret::new(FALLBACK_PASSWORD_HASH.to_string())),
    };

    let outcome = credential_service
        .verify_password(password, expected_password_hash)
        .await;

    match (user, outcome) {
        (Some(user), Ok(true)) => Ok(user),
        (Some(_), Ok(false)) => Err(AuthError::InvalidCredentials(
            anyhow::anyhow!("Invalid password."),
        )),
        (Some(_), Err(e)) => Err(AuthError::UnexpectedError(
            anyhow::Error::new(e).context("Failed to verify the password hash."),
        )),
        (None, _) => Err(AuthError::InvalidCredentials(anyhow::anyhow!(
            "Unknown email."
        ))),
    }
}

/// Validate the credentials and issue a session token for the user.
#[tracing::instrument(
    name = "Authenticate user",
    skip_all,
    fields(user_email = %credentials.email, user_id = tracing::field::Empty)
)]
pub async fn authenticate(
    credentials: LoginCredentials,
    store: &dyn UserStore,
    credential_service: &CredentialService,
) -> Result<AuthenticatedUser, AuthError> {
    let user =
        validate_credentials(credentials, store, credential_service).await?;
    tracing::Span::current()
        .record("user_id", &tracing::field::display(&user.id));

    let token = credential_service
        .issue_token(&user.id, &user.email)
        .context("Failed to issue a session token.")?;

    Ok(AuthenticatedUser { token, user })
}
