use secrecy::Secret;

use crate::domain::{
    FieldError, FullName, PersonName, UserEmail, UserPassword,
    ValidationErrors,
};

/// A registration request that passed validation, password still in
/// plaintext.
#[derive(Debug)]
pub struct NewUser {
    pub fullname: FullName,
    pub email: UserEmail,
    pub password: UserPassword,
}

impl NewUser {
    /// Validate every field, collecting all failures before giving up.
    ///
    /// A blank last name is treated as absent.
    pub fn parse(
        firstname: Option<String>,
        lastname: Option<String>,
        email: Option<String>,
        password: Option<Secret<String>>,
    ) -> Result<NewUser, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let firstname = match firstname {
            Some(firstname) => errors.check(
                "fullname.firstname",
                PersonName::parse(firstname, "First name"),
            ),
            None => {
                errors.push(FieldError::new(
                    "fullname.firstname",
                    "First name is required",
                ));
                None
            }
        };
        let lastname = match lastname.filter(|l| !l.trim().is_empty()) {
            Some(lastname) => errors
                .check(
                    "fullname.lastname",
                    PersonName::parse(lastname, "Last name"),
                )
                .map(Some),
            None => Some(None),
        };
        let email = match email {
            Some(email) => errors.check("email", UserEmail::parse(email)),
            None => {
                errors.push(FieldError::new("email", "Email is required"));
                None
            }
        };
        let password = match password {
            Some(password) => {
                errors.check("password", UserPassword::parse(password))
            }
            None => {
                errors.push(FieldError::new("password", "Password is required"));
                None
            }
        };

        match (firstname, lastname, email, password) {
            (Some(firstname), Some(lastname), Some(email), Some(password))
                if errors.is_empty() =>
            {
                Ok(NewUser {
                    fullname: FullName {
                        firstname,
                        lastname,
                    },
                    email,
                    password,
                })
            }
            _ => Err(errors),
        }
    }
}
