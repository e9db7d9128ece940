use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{LoginUserUseCase, RegisterUserUseCase};

use super::errors::json_error_handler;
use super::handlers::auth::{login_handler, register_handler};
use super::handlers::health::health_handler;

/// Configure authentication routes
///
/// Mounts the auth endpoints under the provided scope (e.g. /api/auth).
///
/// # Routes
///
/// - POST /register - Register a new user account
/// - POST /login - Authenticate and receive a session token
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler));
}

/// Configure root-level routes (liveness probe)
pub fn configure_root_routes(cfg: &mut web::ServiceConfig) {
  cfg.route("/health", web::get().to(health_handler));
}

/// JSON extractor configuration shared by the server and tests
///
/// Routes deserialization failures through the API error type so malformed
/// bodies produce a JSON 400 instead of actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(json_error_handler)
}
