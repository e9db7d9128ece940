use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;

use super::errors::ValidationError;

// ============================================================================
// Email Value Object
// ============================================================================

/// A validated, lowercase-normalized email address.
///
/// Normalization happens here so that every lookup and every stored record
/// uses the same canonical form; the store's unique index sees one value per
/// mailbox regardless of the casing the client sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 8;
  pub const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValidationError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValidationError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// Ensure Password is securely dropped
impl Drop for Password {
  fn drop(&mut self) {
    // Zero out the password memory
    use std::ptr;
    unsafe {
      ptr::write_volatile(self.0.as_mut_ptr(), 0u8.wrapping_mul(self.0.len() as u8));
    }
  }
}

// ============================================================================
// PasswordHash Value Object (Opaque PHC String)
// ============================================================================

/// The derived secret stored in place of the password.
///
/// Opaque to the domain: only the `PasswordHasher` port knows which adaptive
/// algorithm produced it, so the cost factor or algorithm can change without
/// touching the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_email_validation() {
    assert!(Email::new("test@example.com").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
    assert!(Email::new("").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("Test@Example.COM").unwrap();
    assert_eq!(email.as_str(), "test@example.com");
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("password123").is_ok());

    // Exactly at the minimum length
    assert!(Password::new("12345678").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValidationError::PasswordTooShort { .. })
    ));

    let long_password = "a".repeat(129);
    assert!(matches!(
      Password::new(long_password),
      Err(ValidationError::PasswordTooLong { .. })
    ));
  }

  #[test]
  fn test_password_never_printed() {
    let password = Password::new("supersecret1").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(format!("{}", password), "***");
  }
}
