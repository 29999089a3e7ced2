use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{
    decode, encode, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{UserEmail, UserId};

pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum SigningError {
    #[error("The token signing secret is empty")]
    MissingSecret,
    #[error("Failed to sign session token")]
    EncodingFailed(#[source] jsonwebtoken::errors::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("The session token has expired")]
    Expired,
    #[error("The session token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Sign an HS256 token for `user_id`/`email`, valid from `now` for `ttl`.
pub fn issue_token(
    user_id: &UserId,
    email: &UserEmail,
    secret: &Secret<String>,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<String, SigningError> {
    if secret.expose_secret().is_empty() {
        return Err(SigningError::MissingSecret);
    }
    let claims = TokenClaims {
        user_id: user_id.to_string(),
        email: email.as_ref().to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(SigningError::EncodingFailed)
}

/// Check signature and expiry, returning the embedded claims.
pub fn decode_token(
    token: &str,
    secret: &Secret<String>,
) -> Result<TokenClaims, TokenError> {
    let validation = Validation::default();
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e),
    })
}
