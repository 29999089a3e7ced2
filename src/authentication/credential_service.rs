use chrono::{Duration, Utc};
use secrecy::{ExposeSecret, Secret};

use crate::authentication::password::{
    compute_password_hash, verify_password_hash, HashingError,
};
use crate::authentication::token::{
    decode_token, issue_token, SigningError, TokenClaims, TokenError,
    TOKEN_TTL_DAYS,
};
use crate::domain::{UserEmail, UserId};
use crate::telemetry::spawn_blocking_with_tracing;

/// Password hashing and session token signing behind one handle.
///
/// Built once at startup from the application settings and shared by every
/// request handler.
#[derive(Debug, Clone)]
pub struct CredentialService {
    signing_secret: Secret<String>,
    token_ttl: Duration,
}

impl CredentialService {
    /// Fails if the signing secret is empty: the application must not start
    /// without a usable key.
    pub fn new(signing_secret: Secret<String>) -> Result<Self, SigningError> {
        if signing_secret.expose_secret().is_empty() {
            return Err(SigningError::MissingSecret);
        }
        Ok(Self {
            signing_secret,
            token_ttl: Duration::days(TOKEN_TTL_DAYS),
        })
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hashing is CPU-bound, so it runs on the blocking pool.
    #[tracing::instrument(name = "Hash password", skip_all)]
    pub async fn hash_password(
        &self,
        password: Secret<String>,
    ) -> Result<Secret<String>, HashingError> {
        spawn_blocking_with_tracing(move || compute_password_hash(password))
            .await?
    }

    #[tracing::instrument(name = "Verify password", skip_all)]
    pub async fn verify_password(
        &self,
        password_candidate: Secret<String>,
        expected_password_hash: Secret<String>,
    ) -> Result<bool, HashingError> {
        spawn_blocking_with_tracing(move || {
            verify_password_hash(expected_password_hash, password_candidate)
        })
        .await?
    }

    pub fn issue_token(
        &self,
        user_id: &UserId,
        email: &UserEmail,
    ) -> Result<String, SigningError> {
        issue_token(
            user_id,
            email,
            &self.signing_secret,
            self.token_ttl,
            Utc::now(),
        )
    }

    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode_token(token, &self.signing_secret)
    }
}
