pub mod login_user;
pub mod register_user;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::entities::User;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};

/// Public representation of a user, shared by registration and login
///
/// This is the only user shape that leaves the application layer; the
/// password hash never appears here.
#[derive(Debug, Clone)]
pub struct UserProfile {
  /// Unique identifier of the user
  pub user_id: Uuid,
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

impl From<&User> for UserProfile {
  fn from(user: &User) -> Self {
    Self {
      user_id: user.id,
      name: user.name.clone(),
      email: user.email.clone(),
      phone: user.phone.clone(),
      is_email_verified: user.is_email_verified,
      is_phone_verified: user.is_phone_verified,
      created_at: user.created_at,
    }
  }
}
