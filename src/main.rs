use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use monedero::{
  adapters::http::{configure_auth_routes, configure_root_routes, json_config},
  application::auth::{LoginUserUseCase, RegisterUserUseCase},
  domain::auth::services::AuthService,
  infrastructure::{
    config::Config,
    persistence::postgres::PostgresUserRepository,
    security::{Argon2PasswordHasher, JwtSessionSigner},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "monedero=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting monedero backend");

  let config = Config::load().map_err(|e| {
    tracing::error!("Failed to load configuration: {}", e);
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
  })?;
  tracing::info!("Configuration loaded");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::new(
      std::io::ErrorKind::ConnectionRefused,
      format!("Database error: {}", e),
    )
  })?;

  tracing::info!("Database connection pool created");

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .map_err(|e| {
      tracing::error!("Failed to run database migrations: {}", e);
      std::io::Error::other(e.to_string())
    })?;
  tracing::info!("Database migrations completed");

  // Wire the auth service and use cases
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool));
  let password_hasher = Arc::new(Argon2PasswordHasher::new().map_err(|e| {
    tracing::error!("Failed to initialize password hasher: {}", e);
    std::io::Error::other(e.to_string())
  })?);
  let session_signer = Arc::new(JwtSessionSigner::new(
    config.security.jwt_secret.as_bytes(),
    config.security.session_ttl_days,
  ));

  let auth_service = Arc::new(AuthService::new(user_repo, password_hasher, session_signer));

  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service));

  let host = config.server.host.clone();
  let port = config.server.port;
  tracing::info!("Listening on {}:{}", host, port);

  HttpServer::new(move || {
    let register_use_case = register_use_case.clone();
    let login_use_case = login_use_case.clone();

    App::new()
      .wrap(Logger::default())
      .app_data(json_config())
      .configure(configure_root_routes)
      .service(web::scope("/api/auth").configure(move |cfg| {
        configure_auth_routes(cfg, register_use_case, login_use_case)
      }))
  })
  .bind((host, port))?
  .run()
  .await
}
