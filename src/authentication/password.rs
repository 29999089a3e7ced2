use argon2::password_hash::{self, SaltString};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    Version,
};
use secrecy::{ExposeSecret, Secret};

// Argon2id work factor. Parameters are embedded in every PHC string, so
// verification keeps working for hashes produced with older values.
const MEMORY_COST_KIB: u32 = 15000;
const ITERATIONS: u32 = 2;
const PARALLELISM: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum HashingError {
    #[error("Invalid password hashing parameters")]
    InvalidParams(#[source] argon2::Error),
    #[error("Failed to hash password")]
    HashFailed(#[source] password_hash::Error),
    #[error("Stored password hash is not a valid PHC string")]
    MalformedHash(#[source] password_hash::Error),
    #[error("Password hashing task failed to complete")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Salted Argon2id hash of `password`, as a self-describing PHC string.
///
/// Two calls with the same input never return the same string.
pub fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>, HashingError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, None)
        .map_err(HashingError::InvalidParams)?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(HashingError::HashFailed)?
        .to_string();
    Ok(Secret::new(password_hash))
}

/// `Ok(false)` on mismatch; errors are reserved for hashes that cannot be
/// parsed or verified at all.
#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
pub fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<bool, HashingError> {
    let expected_password_hash =
        PasswordHash::new(expected_password_hash.expose_secret())
            .map_err(HashingError::MalformedHash)?;

    match Argon2::default().verify_password(
        password_candidate.expose_secret().as_bytes(),
        &expected_password_hash,
    ) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashingError::MalformedHash(e)),
    }
}
