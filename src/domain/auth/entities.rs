use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// Created exclusively by the registration flow, read by login. No update or
/// delete path exists within this scope; the verification flags stay false
/// until a verification flow lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's display name
  pub name: String,
  /// User's email address (unique, stored lowercase)
  pub email: String,
  /// Derived password hash, never serialized into responses
  pub password_hash: String,
  /// Contact phone number
  pub phone: String,
  /// Whether the user's email has been verified
  pub is_email_verified: bool,
  /// Whether the user's phone has been verified
  pub is_phone_verified: bool,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(name: String, email: String, password_hash: String, phone: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password_hash,
      phone,
      is_email_verified: false,
      is_phone_verified: false,
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  #[allow(clippy::too_many_arguments)]
  pub fn from_db(
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    phone: String,
    is_email_verified: bool,
    is_phone_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password_hash,
      phone,
      is_email_verified,
      is_phone_verified,
      created_at,
      updated_at,
    }
  }
}

/// A signed bearer token together with its expiry
///
/// The token is the sole carrier of session state; nothing is written to the
/// store when one is issued.
#[derive(Debug, Clone)]
pub struct SignedSession {
  /// Encoded session token handed to the client
  pub token: String,
  /// Timestamp when the token stops being accepted
  pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_user_creation() {
    let user = User::new(
      "Test User".to_string(),
      "test@example.com".to_string(),
      "hashed_password".to_string(),
      "5512345678".to_string(),
    );

    assert_eq!(user.name, "Test User");
    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.phone, "5512345678");
    assert!(!user.is_email_verified);
    assert!(!user.is_phone_verified);
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_user_ids_are_unique() {
    let a = User::new(
      "A".to_string(),
      "a@example.com".to_string(),
      "hash".to_string(),
      "1".to_string(),
    );
    let b = User::new(
      "B".to_string(),
      "b@example.com".to_string(),
      "hash".to_string(),
      "2".to_string(),
    );

    assert_ne!(a.id, b.id);
  }
}
