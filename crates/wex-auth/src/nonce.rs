//! Nonce generation for signed requests
//!
//! WEX rejects any trade request whose nonce is not strictly greater than the
//! last one it accepted for the same key, and caps nonces at `u32::MAX - 1`.
//! Once the cap is reached the key is unusable and has to be replaced.
//!
//! The generator is seeded from wall-clock seconds, so a fresh process starts
//! above anything issued by an earlier one. There is no coordination between
//! processes: two processes sharing a key, or a restart within the same
//! second, can produce colliding nonces.

use parking_lot::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

use crate::error::{AuthError, AuthResult};

/// Largest nonce accepted by WEX
pub const MAX_NONCE: u64 = u32::MAX as u64 - 1;

/// Strictly increasing nonce source shared by all requests of one key
///
/// Safe to share between threads; concurrent callers never observe the same
/// value.
#[derive(Debug)]
pub struct NonceGenerator {
    next: Mutex<u64>,
    max: u64,
}

impl NonceGenerator {
    /// Create a generator seeded with the current Unix time in seconds
    pub fn new() -> AuthResult<Self> {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::SystemClock)?
            .as_secs();

        Ok(Self::starting_at(secs))
    }

    /// Create a generator whose first nonce is `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Mutex::new(first),
            max: MAX_NONCE,
        }
    }

    /// Override the exhaustion boundary
    pub fn with_max(mut self, max: u64) -> Self {
        self.max = max;
        self
    }

    /// The exhaustion boundary
    pub fn max(&self) -> u64 {
        self.max
    }

    /// The value the next successful call will return
    pub fn peek(&self) -> u64 {
        *self.next.lock()
    }

    /// Take the next nonce.
    ///
    /// At the boundary this returns [`AuthError::NonceExhausted`] and the
    /// counter is left as is, so every further call fails the same way.
    pub fn next(&self) -> AuthResult<u64> {
        let mut next = self.next.lock();
        let nonce = *next;

        if nonce >= self.max {
            drop(next);
            warn!(max = self.max, "nonce exhausted, API key must be replaced");
            return Err(AuthError::NonceExhausted { max: self.max });
        }

        *next = nonce + 1;
        Ok(nonce)
    }
}
