use secrecy::{ExposeSecret, Secret};

use crate::domain::{FieldError, UserEmail, ValidationErrors};

/// Credentials presented at login.
///
/// The password is only checked for presence: the length policy applies to
/// registration, a short password at login is simply a wrong one.
#[derive(Debug)]
pub struct LoginCredentials {
    pub email: UserEmail,
    pub password: Secret<String>,
}

impl LoginCredentials {
    pub fn parse(
        email: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<LoginCredentials, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let email = match email {
            Some(email) => errors.check("email", UserEmail::parse(email)),
            None => {
                errors.push(FieldError::new("email", "Email is required"));
                None
            }
        };
        let password = match password {
            Some(password) if !password.expose_secret().is_empty() => {
                Some(password)
            }
            _ => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        match (email, password) {
            (Some(email), Some(password)) => {
                Ok(LoginCredentials { email, password })
            }
            _ => Err(errors),
        }
    }
}
