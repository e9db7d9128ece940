pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, HealthResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
pub use errors::ApiError;
pub use routes::{configure_auth_routes, configure_root_routes, json_config};
