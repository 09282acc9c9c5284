//! API credentials for the WEX trade API
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Requires explicit access via `expose_secret()`
//!
//! It is only ever used as an HMAC key.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "WEX_API_KEY";
/// Environment variable holding the API secret
pub const API_SECRET_VAR: &str = "WEX_API_SECRET";

/// API key and secret for authenticated requests
pub struct Credentials {
    /// API key (public, sent in the `Key` header)
    key: String,
    /// API secret (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an API key and secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `WEX_API_KEY` and `WEX_API_SECRET`.
    pub fn from_env() -> AuthResult<Self> {
        let key = std::env::var(API_KEY_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_VAR.to_string()))?;
        let secret = std::env::var(API_SECRET_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_VAR.to_string()))?;

        Ok(Self::new(key, secret))
    }

    /// Get the API key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// HMAC-SHA512 of `payload` keyed by the secret, hex encoded (lowercase)
    pub fn sign(&self, payload: &[u8]) -> AuthResult<String> {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("key", &format!("{}...", prefix))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("KEY-ABCDEFGHIJ", "super-secret-value");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super-secret-value"));
        assert!(!debug.contains("ABCDEFGHIJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_debug_short_multibyte_key() {
        let creds = Credentials::new("ключ", "s");
        assert!(format!("{:?}", creds).contains("ключ..."));
    }

    #[test]
    fn test_sign_rfc4231_vector() {
        let creds = Credentials::new("any", "Jefe");
        let signature = creds.sign(b"what do ya want for nothing?").unwrap();
        assert_eq!(
            signature,
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_sign_is_hex_sha512_length() {
        let creds = Credentials::new("key", "secret");
        let signature = creds.sign(b"method=getInfo&nonce=1").unwrap();
        assert_eq!(signature.len(), 128);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new("key", "secret");
        let cloned = creds.clone();
        assert_eq!(cloned.key(), "key");
        assert_eq!(creds.sign(b"x").unwrap(), cloned.sign(b"x").unwrap());
    }
}
