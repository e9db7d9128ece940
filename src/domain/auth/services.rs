use std::sync::Arc;

use super::entities::{SignedSession, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionSigner, UserRepository};
use super::value_objects::{Email, Password};

/// Authentication service implementing the registration and login flows
///
/// Hashing and token signing sit behind ports so the algorithm choices live
/// in infrastructure; this service only sequences the invariants.
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  session_signer: Arc<dyn SessionSigner>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    session_signer: Arc<dyn SessionSigner>,
  ) -> Self {
    Self {
      user_repo,
      password_hasher,
      session_signer,
    }
  }

  /// Registers a new user account
  ///
  /// Checks uniqueness before hashing so an obviously duplicate request
  /// never pays the hashing cost. Two concurrent registrations can still
  /// both pass the pre-check; the store's unique index is the authoritative
  /// guard and its violation maps to the same conflict outcome.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyRegistered` if the email is taken
  pub async fn register(
    &self,
    name: String,
    email: Email,
    password: Password,
    phone: String,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyRegistered);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(name, email.into_inner(), password_hash.into_inner(), phone);

    match self.user_repo.create(user).await {
      Ok(created) => Ok(created),
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::EmailAlreadyRegistered)
      }
      Err(e) => Err(e),
    }
  }

  /// Authenticates a user and issues a signed session token
  ///
  /// A lookup miss and a hash mismatch both collapse into
  /// `AuthError::InvalidCredentials` so the response never reveals which
  /// of the two fields was wrong.
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` on unknown email or wrong
  /// password
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, SignedSession), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let stored_hash = super::value_objects::PasswordHash::from_hash(&user.password_hash);

    let is_valid = self.password_hasher.verify(&password, &stored_hash).await?;
    if !is_valid {
      return Err(AuthError::InvalidCredentials);
    }

    let session = self.session_signer.sign(user.id)?;

    Ok((user, session))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::value_objects::PasswordHash;
  use crate::infrastructure::persistence::memory::InMemoryUserRepository;
  use async_trait::async_trait;
  use chrono::{Duration, Utc};
  use uuid::Uuid;

  /// Test double that "hashes" by reversing the password
  struct ReversingHasher;

  #[async_trait]
  impl PasswordHasher for ReversingHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
      Ok(PasswordHash::from_hash(
        password.as_str().chars().rev().collect::<String>(),
      ))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError> {
      let rehashed: String = password.as_str().chars().rev().collect();
      Ok(rehashed == hash.as_str())
    }
  }

  /// Test double that embeds the user id directly in the token
  struct StubSigner;

  impl SessionSigner for StubSigner {
    fn sign(&self, user_id: Uuid) -> Result<SignedSession, AuthError> {
      Ok(SignedSession {
        token: format!("stub.{}", user_id),
        expires_at: Utc::now() + Duration::days(7),
      })
    }

    fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
      token
        .strip_prefix("stub.")
        .and_then(|id| id.parse().ok())
        .ok_or(AuthError::Token(crate::domain::auth::errors::TokenError::InvalidToken))
    }
  }

  fn service_with_repo() -> (AuthService, Arc<InMemoryUserRepository>) {
    let repo = Arc::new(InMemoryUserRepository::new());
    let service = AuthService::new(repo.clone(), Arc::new(ReversingHasher), Arc::new(StubSigner));
    (service, repo)
  }

  async fn register_default(service: &AuthService) -> User {
    service
      .register(
        "Ana".to_string(),
        Email::new("a@b.com").unwrap(),
        Password::new("12345678").unwrap(),
        "5512345678".to_string(),
      )
      .await
      .expect("registration should succeed")
  }

  #[tokio::test]
  async fn test_register_persists_user_with_unverified_flags() {
    let (service, repo) = service_with_repo();

    let user = register_default(&service).await;

    assert_eq!(user.email, "a@b.com");
    assert!(!user.is_email_verified);
    assert!(!user.is_phone_verified);

    let stored = repo
      .find_by_email(&Email::new("a@b.com").unwrap())
      .await
      .unwrap()
      .expect("user should be stored");
    assert_eq!(stored.id, user.id);
    // The hash is derived, never the raw password
    assert_ne!(stored.password_hash, "12345678");
  }

  #[tokio::test]
  async fn test_register_duplicate_email_is_conflict() {
    let (service, _repo) = service_with_repo();
    register_default(&service).await;

    let result = service
      .register(
        "Other Name".to_string(),
        Email::new("a@b.com").unwrap(),
        Password::new("differentpass").unwrap(),
        "5500000000".to_string(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered)));
  }

  #[tokio::test]
  async fn test_register_duplicate_email_case_insensitive() {
    let (service, _repo) = service_with_repo();
    register_default(&service).await;

    let result = service
      .register(
        "Ana".to_string(),
        Email::new("A@B.COM").unwrap(),
        Password::new("12345678").unwrap(),
        "5512345678".to_string(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered)));
  }

  #[tokio::test]
  async fn test_register_maps_store_duplicate_to_conflict() {
    // Simulates the pre-check race: the repository itself reports the
    // unique violation and the service translates it.
    let (service, repo) = service_with_repo();

    let colliding = User::new(
      "First".to_string(),
      "a@b.com".to_string(),
      "somehash".to_string(),
      "55".to_string(),
    );
    repo.create(colliding).await.unwrap();

    let result = service
      .register(
        "Second".to_string(),
        Email::new("a@b.com").unwrap(),
        Password::new("12345678").unwrap(),
        "55".to_string(),
      )
      .await;

    assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered)));
  }

  #[tokio::test]
  async fn test_login_success_issues_token_with_user_id_subject() {
    let (service, _repo) = service_with_repo();
    let registered = register_default(&service).await;

    let (user, session) = service
      .login(
        Email::new("a@b.com").unwrap(),
        Password::new("12345678").unwrap(),
      )
      .await
      .expect("login should succeed");

    assert_eq!(user.id, registered.id);
    assert!(session.expires_at > Utc::now());

    let subject = StubSigner.verify(&session.token).unwrap();
    assert_eq!(subject, registered.id);
  }

  #[tokio::test]
  async fn test_login_uppercase_email_finds_user() {
    let (service, _repo) = service_with_repo();
    register_default(&service).await;

    let result = service
      .login(
        Email::new("A@B.com").unwrap(),
        Password::new("12345678").unwrap(),
      )
      .await;

    assert!(result.is_ok());
  }

  #[tokio::test]
  async fn test_login_failures_are_indistinguishable() {
    let (service, _repo) = service_with_repo();
    register_default(&service).await;

    let unknown_email = service
      .login(
        Email::new("nobody@b.com").unwrap(),
        Password::new("12345678").unwrap(),
      )
      .await;

    let wrong_password = service
      .login(
        Email::new("a@b.com").unwrap(),
        Password::new("wrongpass").unwrap(),
      )
      .await;

    // Both collapse into the same variant, so the same message reaches the
    // client in either case.
    let msg_a = unknown_email.unwrap_err().to_string();
    let msg_b = wrong_password.unwrap_err().to_string();
    assert_eq!(msg_a, msg_b);
  }
}
