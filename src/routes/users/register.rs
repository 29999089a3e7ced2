use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use secrecy::Secret;

use crate::authentication::{register_user, CredentialService, RegisterError};
use crate::domain::{NewUser, ValidationErrors};
use crate::routes::users::internal_error_response;
use crate::user_store::UserStore;
use crate::utils::error_chain_fmt;

// Every field is optional so that missing values surface as field errors
// instead of a generic deserialization failure.
#[derive(serde::Deserialize)]
pub struct RegisterBody {
    fullname: Option<FullNameBody>,
    email: Option<String>,
    password: Option<Secret<String>>,
}

#[derive(serde::Deserialize)]
pub struct FullNameBody {
    firstname: Option<String>,
    lastname: Option<String>,
}

impl TryFrom<RegisterBody> for NewUser {
    type Error = ValidationErrors;

    fn try_from(body: RegisterBody) -> Result<Self, Self::Error> {
        let (firstname, lastname) = match body.fullname {
            Some(fullname) => (fullname.firstname, fullname.lastname),
            None => (None, None),
        };
        NewUser::parse(firstname, lastname, body.email, body.password)
    }
}

#[derive(thiserror::Error)]
pub enum RegisterUserError {
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error("A user with this email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for RegisterUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<RegisterError> for RegisterUserError {
    fn from(e: RegisterError) -> Self {
        match e {
            RegisterError::DuplicateEmail => Self::DuplicateEmail,
            RegisterError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

impl ResponseError for RegisterUserError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::ValidationError(errors) => {
                HttpResponse::BadRequest().json(errors)
            }
            Self::DuplicateEmail => HttpResponse::Conflict()
                .json(serde_json::json!({ "error": self.to_string() })),
            // The cause chain is logged by the request span, never sent.
            Self::UnexpectedError(_) => internal_error_response(),
        }
    }
}

#[tracing::instrument(name = "Registering a new user", skip_all)]
pub async fn register(
    body: web::Json<RegisterBody>,
    store: web::Data<dyn UserStore>,
    credentials: web::Data<CredentialService>,
) -> Result<HttpResponse, RegisterUserError> {
    let new_user: NewUser = body
        .into_inner()
        .try_into()
        .map_err(RegisterUserError::ValidationError)?;
    let authenticated =
        register_user(new_user, store.get_ref(), &credentials).await?;
    Ok(HttpResponse::Ok().json(authenticated))
}
