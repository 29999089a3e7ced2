use secrecy::{ExposeSecret, Secret};

const MIN_LENGTH: usize = 8;

/// A plaintext password that passed the registration policy.
#[derive(Debug, Clone)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(s: Secret<String>) -> Result<UserPassword, String> {
        if s.expose_secret().chars().count() < MIN_LENGTH {
            Err(format!(
                "Password must be at least {} characters long",
                MIN_LENGTH
            ))
        } else {
            Ok(Self(s))
        }
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
