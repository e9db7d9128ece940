use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{SignedSession, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash};

/// Repository trait for user persistence operations
///
/// The credential store is intentionally narrow: registration writes once,
/// login reads by email. Nothing else in this flow touches user records.
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user in the repository
  ///
  /// Must surface the store's unique-email violation as
  /// `RepositoryError::DuplicateKey` so the service can translate it to the
  /// same conflict outcome as the pre-insert check.
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their normalized email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a fresh random salt
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError>;
}

/// Service trait for issuing and checking signed session tokens
pub trait SessionSigner: Send + Sync {
  /// Signs a session token carrying the user id as its subject claim
  fn sign(&self, user_id: Uuid) -> Result<SignedSession, AuthError>;

  /// Verifies a token and returns the subject user id
  fn verify(&self, token: &str) -> Result<Uuid, AuthError>;
}
