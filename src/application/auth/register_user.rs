use std::sync::Arc;

use crate::application::auth::UserProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, Password};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's display name
  pub name: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
  /// User's contact phone number
  pub phone: String,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if validation fails or the email is already taken
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<UserProfile, AuthError> {
    let email = Email::new(command.email)?;
    let password = Password::new(command.password)?;

    let user = self
      .auth_service
      .register(command.name, email, password, command.phone)
      .await?;

    Ok(UserProfile::from(&user))
  }
}
