mod credential_service;
mod login;
mod password;
mod register;
mod token;

pub use credential_service::CredentialService;
pub use login::{authenticate, validate_credentials, AuthError};
pub use password::{compute_password_hash, verify_password_hash, HashingError};
pub use register::{register_user, AuthenticatedUser, RegisterError};
pub use token::{
    decode_token, issue_token, SigningError, TokenClaims, TokenError,
    TOKEN_TTL_DAYS,
};
