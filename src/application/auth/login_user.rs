use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::auth::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful user login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Signed session token for the client to persist
  pub token: String,
  /// Timestamp when the token expires
  pub expires_at: DateTime<Utc>,
  /// Public representation of the authenticated user
  pub user: UserProfile,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
  /// password; the two are deliberately indistinguishable
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::new(command.email).map_err(|_| AuthError::InvalidCredentials)?;
    let password = Password::new(command.password).map_err(|_| AuthError::InvalidCredentials)?;

    let (user, session) = self.auth_service.login(email, password).await?;

    Ok(LoginUserResponse {
      token: session.token,
      expires_at: session.expires_at,
      user: UserProfile::from(&user),
    })
  }
}
