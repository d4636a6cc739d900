use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use sha2::Sha256;
use time::OffsetDateTime;

use crate::{core::TOKEN_LENGTH, error::GameError};

type HmacSha256 = Hmac<Sha256>;

/// Issues opaque game session tokens
///
/// A token is the keyed SHA-256 digest of a nanosecond timestamp, a
/// per-issuer nonce and the retry attempt, encoded as URL-safe base64.
/// The secret keeps tokens unguessable from their issue time.
#[derive(Debug)]
pub struct TokenIssuer {
    secret_key: String,
    nonce: u64,
}

impl TokenIssuer {
    /// Create an issuer with a random 64 character secret
    pub fn new() -> Self {
        let secret_key: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();

        Self::with_secret(secret_key)
    }

    pub fn with_secret(secret_key: String) -> Self {
        Self {
            secret_key,
            nonce: 0,
        }
    }

    /// Produce a candidate token
    ///
    /// # Arguments
    ///
    /// * `attempt` - Retry counter, mixed in when a candidate collided
    ///
    /// # Errors
    ///
    /// Returns an error if HMAC initialization fails
    pub fn candidate(&mut self, attempt: u32) -> Result<String, GameError> {
        self.nonce = self.nonce.wrapping_add(1);

        let timestamp = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let payload = format!("{}:{}:{}", timestamp, self.nonce, attempt);

        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| GameError::Internal(format!("HMAC initialization error: {}", e)))?;
        mac.update(payload.as_bytes());

        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `token` has the shape of an issued token
pub fn is_well_formed_token(token: &str) -> bool {
    token.len() == TOKEN_LENGTH
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
