//! Password hashing and bearer tokens

use base64::{engine::general_purpose, Engine as _};
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pbkdf2::hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::content::User;

const HASH_SCHEME: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const DUMMY_SALT: &str = "0000000000000000";

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("token missing")]
    MissingToken,

    #[error("token invalid")]
    InvalidToken,

    #[error("Password hashing failed")]
    Hash,

    #[error("Token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by a login token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// User id
    pub id: String,
    pub exp: i64,
}

/// Hash a password as `pbkdf2_sha256$<iterations>$<salt>$<base64 hash>`
pub fn hash_password(password: &str, iterations: u32) -> Result<String, AuthError> {
    let salt: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect();
    let hash = derive(password, &salt, iterations)?;
    Ok(format!("{}${}${}${}", HASH_SCHEME, iterations, salt, hash))
}

/// Check a password against a stored hash
///
/// Hashes in any other format never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let parts: Vec<&str> = stored.split('$').collect();
    if parts.len() != 4 || parts[0] != HASH_SCHEME {
        return false;
    }

    let iterations: u32 = match parts[1].parse() {
        Ok(i) => i,
        Err(_) => return false,
    };

    match derive(password, parts[2], iterations) {
        Ok(computed) => constant_time_eq(computed.as_bytes(), parts[3].as_bytes()),
        Err(_) => false,
    }
}

/// Check a login attempt, doing the same hashing work when there is no user
pub fn verify_login(password: &str, stored: Option<&str>, iterations: u32) -> bool {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            let _ = derive(password, DUMMY_SALT, iterations);
            false
        }
    }
}

fn derive(password: &str, salt: &str, iterations: u32) -> Result<String, AuthError> {
    let mut output = [0u8; 32];
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt.as_bytes(), iterations, &mut output)
        .map_err(|_| AuthError::Hash)?;
    Ok(general_purpose::STANDARD.encode(output))
}

/// Issue an HS256 token for a user, valid for `ttl_secs`
pub fn issue_token(secret: &str, user: &User, ttl_secs: i64) -> Result<String, AuthError> {
    let claims = Claims {
        username: user.username.clone(),
        id: user.id.clone(),
        exp: (chrono::Utc::now() + chrono::Duration::seconds(ttl_secs)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate a token's signature and expiry
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        AuthError::InvalidToken
    })
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingToken)?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn user() -> User {
        User {
            id: "5a422a851b54a676234d17f7".to_string(),
            username: "root".to_string(),
            name: "Superuser".to_string(),
            password_hash: String::new(),
            blogs: Vec::new(),
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("sekret", 1_000).unwrap();
        assert!(hash.starts_with("pbkdf2_sha256$1000$"));
        assert!(verify_password("sekret", &hash));
        assert!(!verify_password("secret", &hash));
    }

    #[test]
    fn test_hash_uses_fresh_salt() {
        assert_ne!(
            hash_password("sekret", 1_000).unwrap(),
            hash_password("sekret", 1_000).unwrap()
        );
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!verify_password("sekret", "invalid_format"));
        assert!(!verify_password("sekret", "sha256$abc"));
        assert!(!verify_password("sekret", "pbkdf2_sha256$many$salt$hash"));
    }

    #[test]
    fn test_verify_login() {
        let hash = hash_password("sekret", 1_000).unwrap();
        assert!(verify_login("sekret", Some(&hash), 1_000));
        assert!(!verify_login("wrong", Some(&hash), 1_000));
        assert!(!verify_login("sekret", None, 1_000));
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token(SECRET, &user(), 60).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.username, "root");
        assert_eq!(claims.id, "5a422a851b54a676234d17f7");
    }

    #[test]
    fn test_token_wrong_secret() {
        let token = issue_token(SECRET, &user(), 60).unwrap();
        assert!(matches!(
            verify_token("other-secret", &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_expired() {
        let token = issue_token(SECRET, &user(), -3600).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert!(matches!(extract_bearer(None), Err(AuthError::MissingToken)));
        assert!(matches!(
            extract_bearer(Some("Token abc")),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            extract_bearer(Some("Bearer ")),
            Err(AuthError::InvalidToken)
        ));
    }
}
