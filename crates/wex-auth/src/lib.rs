//! Authentication for the WEX trade API
//!
//! Trade API calls are form-encoded POSTs carrying a strictly increasing
//! nonce and an HMAC-SHA512 signature of the body. This crate provides the
//! pieces to build them:
//!
//! - [`Credentials`] - API key and secret (secret zeroized on drop, never logged)
//! - [`NonceGenerator`] - clock-seeded, thread-safe, exhaustion-aware counter
//! - [`RequestSigner`] - draws a nonce and signs a method call
//!
//! # Example
//!
//! ```
//! use wex_auth::{Credentials, NonceGenerator, RequestSigner};
//!
//! let creds = Credentials::new("my-key", "my-secret");
//! let signer = RequestSigner::with_nonces(creds, NonceGenerator::starting_at(1));
//!
//! let signed = signer.sign("ActiveOrders", &[("pair", "btc_usd")])?;
//! assert_eq!(signed.body, "method=ActiveOrders&nonce=1&pair=btc_usd");
//! # Ok::<(), wex_auth::AuthError>(())
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::{Credentials, API_KEY_VAR, API_SECRET_VAR};
pub use error::{AuthError, AuthResult};
pub use nonce::{NonceGenerator, MAX_NONCE};
pub use signer::{sign_payload, RequestSigner, SignedRequest, FORM_CONTENT_TYPE, KEY_HEADER, SIGN_HEADER};
