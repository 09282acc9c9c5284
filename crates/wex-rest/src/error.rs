//! REST client errors
//!
//! Each variant corresponds to one stage of a call, and the messages keep a
//! stable prefix naming that stage so failures can be told apart in logs.

use crate::transport::TransportError;
use thiserror::Error;
use wex_auth::AuthError;

/// Errors that can occur while calling the WEX API
#[derive(Error, Debug)]
pub enum RestError {
    /// Building, sending or reading the HTTP exchange failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a status other than 200
    #[error("server respond with status code {0}")]
    Status(u16),

    /// The envelope reported `success: 0` with an error message
    #[error("server respond with error: {0}")]
    Api(String),

    /// The body is not a JSON object with the expected envelope fields
    #[error("unmarshal to base response: {0}")]
    DecodeEnvelope(#[source] serde_json::Error),

    /// The payload does not match the requested type
    #[error("unmarshal to result: {0}")]
    DecodeResult(#[source] serde_json::Error),

    /// Nonce or signing failure; nothing was sent
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A trade API call was made on a client without credentials
    #[error("authentication required for this endpoint")]
    AuthRequired,
}

impl RestError {
    /// HTTP status, if the server answered with a non-200 code
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// Message reported by the API, if any
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether the key's nonce space is used up
    pub fn requires_key_rotation(&self) -> bool {
        matches!(self, Self::Auth(e) if e.requires_key_rotation())
    }

    /// Whether the response arrived but could not be decoded
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::DecodeEnvelope(_) | Self::DecodeResult(_))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RestError::Status(500).to_string(),
            "server respond with status code 500"
        );
        assert_eq!(
            RestError::Api("Invalid method".into()).to_string(),
            "server respond with error: Invalid method"
        );
        assert_eq!(
            RestError::from(TransportError::Request("timeout".into())).to_string(),
            "do request: timeout"
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(RestError::Status(404).status_code(), Some(404));
        assert_eq!(RestError::AuthRequired.status_code(), None);
        assert_eq!(RestError::Api("x".into()).api_message(), Some("x"));

        let exhausted = RestError::from(AuthError::NonceExhausted { max: 10 });
        assert!(exhausted.requires_key_rotation());
        assert_eq!(exhausted.to_string(), "max value reached: create new key");
        assert!(!RestError::Status(500).requires_key_rotation());

        let decode = serde_json::from_str::<u8>("x").unwrap_err();
        assert!(RestError::DecodeResult(decode).is_decode_error());
    }
}
