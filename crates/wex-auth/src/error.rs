//! Error types for authentication operations

/// Errors that can occur while preparing an authenticated request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The nonce reached the largest value WEX accepts for a key
    #[error("max value reached: create new key")]
    NonceExhausted {
        /// The exhausted boundary
        max: u64,
    },

    /// System clock is before the Unix epoch
    #[error("system clock error: time went backwards")]
    SystemClock,

    /// Invalid API credentials
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Request body could not be form-encoded
    #[error("encode request body: {0}")]
    Encode(String),

    /// Environment variable not set
    #[error("environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl AuthError {
    /// Whether the API key must be replaced before signing again
    pub fn requires_key_rotation(&self) -> bool {
        matches!(self, Self::NonceExhausted { .. })
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
