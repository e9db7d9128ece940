use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User, errors::AuthError, ports::UserRepository, value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for the users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password_hash: String,
  phone: String,
  is_email_verified: bool,
  is_phone_verified: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.name,
      row.email,
      row.password_hash,
      row.phone,
      row.is_email_verified,
      row.is_phone_verified,
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    // A unique-violation error surfaces as RepositoryError::DuplicateKey
    // through the From<sqlx::Error> conversion; the unique index on
    // LOWER(email) is the authoritative guard against concurrent inserts.
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (
                id,
                name,
                email,
                password_hash,
                phone,
                is_email_verified,
                is_phone_verified,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id,
                name,
                email,
                password_hash,
                phone,
                is_email_verified,
                is_phone_verified,
                created_at,
                updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.phone)
    .bind(user.is_email_verified)
    .bind(user.is_phone_verified)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT
                id,
                name,
                email,
                password_hash,
                phone,
                is_email_verified,
                is_phone_verified,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.into())),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::RepositoryError;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  fn sample_user(email: &str) -> User {
    User::new(
      "Test User".to_string(),
      email.to_string(),
      "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hash".to_string(),
      "5512345678".to_string(),
    )
  }

  #[tokio::test]
  #[ignore = "requires a local Docker daemon"]
  async fn test_create_and_find_by_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let user = sample_user("test@example.com");
    let id = user.id;

    let created = repo.create(user).await.unwrap();
    assert_eq!(created.id, id);
    assert!(!created.is_email_verified);

    let found = repo
      .find_by_email(&Email::new("test@example.com").unwrap())
      .await
      .unwrap()
      .expect("user should exist");
    assert_eq!(found.id, id);
    assert_eq!(found.email, "test@example.com");
  }

  #[tokio::test]
  #[ignore = "requires a local Docker daemon"]
  async fn test_duplicate_email_is_unique_violation() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo.create(sample_user("test@example.com")).await.unwrap();

    let result = repo.create(sample_user("test@example.com")).await;
    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }

  #[tokio::test]
  #[ignore = "requires a local Docker daemon"]
  async fn test_unique_index_is_case_insensitive() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo.create(sample_user("test@example.com")).await.unwrap();

    // The index covers LOWER(email), so a differently-cased insert that
    // slipped past normalization still collides.
    let result = repo.create(sample_user("Test@Example.com")).await;
    assert!(matches!(
      result,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }
}
