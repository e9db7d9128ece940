use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::auth::UserProfile;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  /// User's display name
  #[validate(length(min = 1, message = "Name is required"))]
  pub name: String,

  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,

  /// User's contact phone number
  #[validate(length(min = 1, message = "Phone is required"))]
  pub phone: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  /// User's email address
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Public user representation returned to clients
///
/// Field names are camelCase on the wire; the mobile client persists this
/// object verbatim, so the shape is part of the contract. The password hash
/// has no field here by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
  /// Unique identifier of the user
  pub id: Uuid,
  /// User's display name
  pub name: String,
  /// User's email address
  pub email: String,
  /// User's contact phone number
  pub phone: String,
  /// Whether the user's email has been verified
  pub is_email_verified: bool,
  /// Whether the user's phone has been verified
  pub is_phone_verified: bool,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserResponse {
  fn from(profile: UserProfile) -> Self {
    Self {
      id: profile.user_id,
      name: profile.name,
      email: profile.email,
      phone: profile.phone,
      is_email_verified: profile.is_email_verified,
      is_phone_verified: profile.is_phone_verified,
      created_at: profile.created_at,
    }
  }
}

/// Response after successful login: the exact pair the client persists
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
  /// Signed session token
  pub token: String,
  /// Public representation of the authenticated user
  pub user: UserResponse,
}

/// Error response body shared by all failure outcomes
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Stable machine-readable error code
  pub error: String,
  /// Short human-readable message
  pub message: String,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub ok: bool,
  pub ts: DateTime<Utc>,
}
