pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{SignedSession, User};
pub use errors::{AuthError, HashError, RepositoryError, TokenError, ValidationError};
pub use value_objects::{Email, Password, PasswordHash};
