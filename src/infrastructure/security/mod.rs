pub mod argon2_hasher;
pub mod jwt_signer;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_signer::JwtSessionSigner;
