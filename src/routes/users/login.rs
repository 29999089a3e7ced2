use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use secrecy::Secret;

use crate::authentication::{authenticate, AuthError, CredentialService};
use crate::domain::{LoginCredentials, ValidationErrors};
use crate::routes::users::internal_error_response;
use crate::user_store::UserStore;
use crate::utils::error_chain_fmt;

#[derive(serde::Deserialize)]
pub struct LoginBody {
    email: Option<String>,
    password: Option<Secret<String>>,
}

impl TryFrom<LoginBody> for LoginCredentials {
    type Error = ValidationErrors;

    fn try_from(body: LoginBody) -> Result<Self, Self::Error> {
        LoginCredentials::parse(body.email, body.password)
    }
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    ValidationError(ValidationErrors),
    #[error("Authentication failed")]
    AuthError(#[source] anyhow::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<AuthError> for LoginError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials(e) => Self::AuthError(e),
            AuthError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

impl ResponseError for LoginError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::AuthError(_) => StatusCode::UNAUTHORIZED,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::ValidationError(errors) => {
                HttpResponse::BadRequest().json(errors)
            }
            // Same body whether the email is unknown or the password wrong.
            Self::AuthError(_) => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "message": "Invalid email or password" })),
            Self::UnexpectedError(_) => internal_error_response(),
        }
    }
}

#[tracing::instrument(name = "Logging a user in", skip_all)]
pub async fn login(
    body: web::Json<LoginBody>,
    store: web::Data<dyn UserStore>,
    credentials: web::Data<CredentialService>,
) -> Result<HttpResponse, LoginError> {
    let login_credentials: LoginCredentials = body
        .into_inner()
        .try_into()
        .map_err(LoginError::ValidationError)?;
    let authenticated =
        authenticate(login_credentials, store.get_ref(), &credentials).await?;
    Ok(HttpResponse::Ok().json(authenticated))
}
