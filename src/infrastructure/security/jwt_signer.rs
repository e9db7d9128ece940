use chrono::{Duration, Utc};
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::entities::SignedSession;
use crate::domain::auth::errors::{AuthError, TokenError};
use crate::domain::auth::ports::SessionSigner;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  /// Subject claim holding the user id
  sub: String,
  /// Issued-at timestamp (Unix seconds)
  iat: i64,
  /// Expiration timestamp (Unix seconds)
  exp: i64,
}

/// HS256 session signer backed by a server-held secret
///
/// The token is the sole bearer of session state; there is no server-side
/// session table and no revocation before expiry.
pub struct JwtSessionSigner {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validity: Duration,
}

impl JwtSessionSigner {
  /// Creates a signer with the given secret and validity window in days
  pub fn new(secret: &[u8], validity_days: i64) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      validity: Duration::days(validity_days),
    }
  }
}

impl SessionSigner for JwtSessionSigner {
  fn sign(&self, user_id: Uuid) -> Result<SignedSession, AuthError> {
    let now = Utc::now();
    let expires_at = now + self.validity;

    let claims = Claims {
      sub: user_id.to_string(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| AuthError::Token(TokenError::SigningFailed(e.to_string())))?;

    Ok(SignedSession { token, expires_at })
  }

  fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
      decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::Token(TokenError::Expired),
        _ => AuthError::Token(TokenError::InvalidToken),
      })?;

    token_data
      .claims
      .sub
      .parse()
      .map_err(|_| AuthError::Token(TokenError::InvalidToken))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &[u8] = b"test-secret-key-that-is-long-enough";

  #[test]
  fn test_sign_and_verify_round_trip() {
    let signer = JwtSessionSigner::new(SECRET, 7);
    let user_id = Uuid::new_v4();

    let session = signer.sign(user_id).unwrap();

    let subject = signer.verify(&session.token).unwrap();
    assert_eq!(subject, user_id);
  }

  #[test]
  fn test_validity_window_is_seven_days() {
    let signer = JwtSessionSigner::new(SECRET, 7);

    let before = Utc::now() + Duration::days(7) - Duration::seconds(5);
    let session = signer.sign(Uuid::new_v4()).unwrap();
    let after = Utc::now() + Duration::days(7) + Duration::seconds(5);

    assert!(session.expires_at > before);
    assert!(session.expires_at < after);
  }

  #[test]
  fn test_wrong_secret_is_rejected() {
    let signer = JwtSessionSigner::new(SECRET, 7);
    let other = JwtSessionSigner::new(b"a-completely-different-secret", 7);

    let session = signer.sign(Uuid::new_v4()).unwrap();

    let result = other.verify(&session.token);
    assert!(matches!(
      result,
      Err(AuthError::Token(TokenError::InvalidToken))
    ));
  }

  #[test]
  fn test_garbage_token_is_rejected() {
    let signer = JwtSessionSigner::new(SECRET, 7);

    let result = signer.verify("not-a-valid-jwt");
    assert!(matches!(
      result,
      Err(AuthError::Token(TokenError::InvalidToken))
    ));
  }

  #[test]
  fn test_tampered_token_is_rejected() {
    let signer = JwtSessionSigner::new(SECRET, 7);
    let session = signer.sign(Uuid::new_v4()).unwrap();

    // Flip a character in the payload segment
    let mut tampered = session.token.clone();
    let mid = tampered.len() / 2;
    let replacement = if tampered.as_bytes()[mid] == b'A' { "B" } else { "A" };
    tampered.replace_range(mid..mid + 1, replacement);

    assert!(signer.verify(&tampered).is_err());
  }
}
