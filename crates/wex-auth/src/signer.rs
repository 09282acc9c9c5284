//! Request signing for the trade API
//!
//! A trade request is a form-encoded POST body
//! `method=<Method>&nonce=<N>&<param>=<value>...` signed with HMAC-SHA512 of
//! exactly those bytes. The signed string is the body that goes on the wire;
//! re-encoding it in between would invalidate the signature.

use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};
use crate::nonce::NonceGenerator;

/// Header carrying the API key
pub const KEY_HEADER: &str = "Key";
/// Header carrying the hex signature
pub const SIGN_HEADER: &str = "Sign";
/// Content type of the signed body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A signed, ready to send trade request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Form-encoded body, byte-identical to what was signed
    pub body: String,
    /// API key for the `Key` header
    pub key: String,
    /// Hex HMAC-SHA512 of `body` for the `Sign` header
    pub signature: String,
    /// Nonce embedded in `body`
    pub nonce: u64,
}

impl SignedRequest {
    /// Headers to attach to the POST, in order
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            (KEY_HEADER, self.key.as_str()),
            (SIGN_HEADER, self.signature.as_str()),
            ("Content-Type", FORM_CONTENT_TYPE),
        ]
    }
}

/// Encode `{method, nonce, ...params}` and sign it.
///
/// Deterministic: the same inputs always produce the same body and signature.
pub fn sign_payload(
    credentials: &Credentials,
    method: &str,
    nonce: u64,
    params: &[(&str, &str)],
) -> AuthResult<SignedRequest> {
    let nonce_str = nonce.to_string();

    let mut fields: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 2);
    fields.push(("method", method));
    fields.push(("nonce", nonce_str.as_str()));
    fields.extend_from_slice(params);

    let body =
        serde_urlencoded::to_string(&fields).map_err(|e| AuthError::Encode(e.to_string()))?;
    let signature = credentials.sign(body.as_bytes())?;

    Ok(SignedRequest {
        body,
        key: credentials.key().to_string(),
        signature,
        nonce,
    })
}

/// Signs trade requests for one credential pair
///
/// Owns the pair's [`NonceGenerator`]; share one signer (e.g. behind an
/// `Arc`) between everything that uses the same key.
#[derive(Debug)]
pub struct RequestSigner {
    credentials: Credentials,
    nonces: NonceGenerator,
}

impl RequestSigner {
    /// Create a signer with a clock-seeded nonce generator
    pub fn new(credentials: Credentials) -> AuthResult<Self> {
        Ok(Self::with_nonces(credentials, NonceGenerator::new()?))
    }

    /// Create a signer with an explicit nonce generator
    pub fn with_nonces(credentials: Credentials, nonces: NonceGenerator) -> Self {
        Self {
            credentials,
            nonces,
        }
    }

    /// Get the credentials
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the nonce generator
    pub fn nonces(&self) -> &NonceGenerator {
        &self.nonces
    }

    /// Take a nonce and sign `method` with `params`
    #[instrument(skip(self, params), fields(params = params.len()))]
    pub fn sign(&self, method: &str, params: &[(&str, &str)]) -> AuthResult<SignedRequest> {
        let nonce = self.nonces.next()?;
        debug!(nonce, "signing trade request");
        sign_payload(&self.credentials, method, nonce, params)
    }
}
