use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::Email,
};

/// In-memory implementation of the UserRepository trait
///
/// Backs tests and local development without a database. Enforces the same
/// unique-email invariant the Postgres schema does, so the duplicate-insert
/// path behaves identically.
#[derive(Default)]
pub struct InMemoryUserRepository {
  users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
  /// Creates a new empty repository
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the number of stored users
  pub async fn len(&self) -> usize {
    self.users.read().await.len()
  }

  /// Returns true when no users are stored
  pub async fn is_empty(&self) -> bool {
    self.users.read().await.is_empty()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.write().await;

    if users.values().any(|u| u.email == user.email) {
      return Err(AuthError::Repository(RepositoryError::DuplicateKey(
        user.email.clone(),
      )));
    }

    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let users = self.users.read().await;
    Ok(users.values().find(|u| u.email == email.as_str()).cloned())
  }
}
