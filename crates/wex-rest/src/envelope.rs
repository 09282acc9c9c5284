//! Two-phase response decoding
//!
//! Every WEX response is first read as an envelope
//! `{"success": 0|1, "error": "...", "return": {...}}`. Only once the envelope
//! says the call did not fail is the payload decoded into the caller's type.
//!
//! Public endpoints have no envelope of their own: their envelope fields are
//! simply absent and the payload is the whole body. Trade endpoints carry the
//! payload in `return`.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. status must be 200 (the body is not inspected otherwise)
//! 2. the body must parse as an envelope object
//! 3. `success` false together with an `error` string is an API error
//! 4. the payload must decode into the target type

use crate::error::{RestError, RestResult};
use crate::transport::HttpResponse;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;
use wex_types::wire::boolean;

/// Fields shared by every response
#[derive(Debug, Deserialize)]
struct Envelope<'a> {
    #[serde(default, deserialize_with = "boolean::deserialize")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "return", borrow)]
    payload: Option<&'a RawValue>,
}

/// Where the payload lives in the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// The `return` field (trade API)
    Return,
    /// The whole body (public API)
    Body,
}

/// Decode an HTTP response into `T`.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse, segment: Segment) -> RestResult<T> {
    if response.status != 200 {
        debug!(status = response.status, "Non-200 response");
        return Err(RestError::Status(response.status));
    }
    decode_body(&response.body, segment)
}

/// Decode a 200 response body into `T`.
pub fn decode_body<T: DeserializeOwned>(body: &[u8], segment: Segment) -> RestResult<T> {
    let envelope: Envelope<'_> = serde_json::from_slice(body).map_err(RestError::DecodeEnvelope)?;

    if !envelope.success {
        if let Some(message) = envelope.error {
            return Err(RestError::Api(message));
        }
    }

    let payload: &[u8] = match segment {
        Segment::Body => body,
        // a missing `return` decodes like an explicit null
        Segment::Return => envelope
            .payload
            .map(|raw| raw.get().as_bytes())
            .unwrap_or(b"null"),
    };

    serde_json::from_slice(payload).map_err(RestError::DecodeResult)
}
