use actix_web::{
  HttpRequest, HttpResponse,
  error::{JsonPayloadError, ResponseError},
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::auth::errors::{AuthError, RepositoryError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
pub enum ApiError {
  /// Validation error (400 Bad Request)
  Validation(String),

  /// Invalid credentials (401 Unauthorized)
  ///
  /// Lookup miss and password mismatch both land here, so the response body
  /// is byte-identical for the two causes.
  InvalidCredentials,

  /// Email already registered (409 Conflict)
  EmailAlreadyRegistered,

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
      ApiError::EmailAlreadyRegistered => write!(f, "Email already registered"),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
      ApiError::EmailAlreadyRegistered => StatusCode::CONFLICT,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::InvalidCredentials => (
        "invalid_credentials",
        "Invalid email or password".to_string(),
      ),
      ApiError::EmailAlreadyRegistered => (
        "email_already_registered",
        "An account with this email already exists".to_string(),
      ),
      ApiError::Internal(msg) => {
        // Log the detail, surface only a generic message
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AuthError to ApiError
impl From<AuthError> for ApiError {
  fn from(error: AuthError) -> Self {
    match error {
      AuthError::InvalidCredentials => ApiError::InvalidCredentials,
      AuthError::EmailAlreadyRegistered => ApiError::EmailAlreadyRegistered,
      AuthError::Validation(err) => ApiError::Validation(err.to_string()),
      AuthError::Repository(err) => match err {
        // Unique violation on insert: same outcome as the pre-insert check
        RepositoryError::DuplicateKey(_) => ApiError::EmailAlreadyRegistered,
        _ => ApiError::Internal(err.to_string()),
      },
      AuthError::Hash(err) => ApiError::Internal(err.to_string()),
      AuthError::Token(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from the validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

/// Error handler for malformed or field-missing JSON bodies
///
/// Keeps the "every failure is a JSON body" contract instead of actix's
/// plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  ApiError::Validation(err.to_string()).into()
}
