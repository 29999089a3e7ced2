mod login;
mod register;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};

use crate::domain::{FieldError, ValidationErrors};

pub use login::*;
pub use register::*;

/// Reject bodies that are not JSON at all with the same shape as field
/// validation errors.
pub fn json_error_handler(
    err: JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    let mut errors = ValidationErrors::default();
    errors.push(FieldError::new("body", err.to_string()));
    let response = HttpResponse::BadRequest().json(&errors);
    InternalError::from_response(err, response).into()
}

pub(crate) fn internal_error_response() -> HttpResponse {
    HttpResponse::InternalServerError()
        .json(serde_json::json!({ "error": "Internal server error" }))
}
