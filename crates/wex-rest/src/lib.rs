//! REST API client for the WEX cryptocurrency exchange
//!
//! This crate provides a client for WEX's public market data API and its
//! signed trade API.
//!
//! # Features
//!
//! - **Market Data**: Pair info, ticker, order book depth, recent trades
//! - **Account**: Balances, key rights, open orders
//! - **Trading**: Place and cancel orders, look up orders
//! - **Funding**: Coin withdrawals
//!
//! # Authentication
//!
//! Trade endpoints require API credentials. Every call carries a strictly
//! increasing nonce and an HMAC-SHA512 signature of the form body; see
//! [`wex_auth`]. Once the nonce reaches its ceiling the key must be replaced
//! ([`RestError::requires_key_rotation`]).
//!
//! # Example
//!
//! ```no_run
//! use wex_rest::{Credentials, OrderSide, WexClient};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = WexClient::new()?;
//!     let book = client.depth("btc_usd", Some(10)).await?;
//!     println!("best ask: {:?}", book.best_ask());
//!
//!     // Trade endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = WexClient::with_credentials(creds)?;
//!     let placed = auth_client
//!         .trade("btc_usd", OrderSide::Buy, Decimal::new(1005, 1), Decimal::new(1, 2))
//!         .await?;
//!     println!("order id: {}", placed.order_id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Failures are reported per stage: transport, HTTP status, API error
//! message, envelope decoding and payload decoding each have their own
//! [`RestError`] variant. Nothing is retried.

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod transport;

// Re-export main types
pub use client::{ClientConfig, WexClient, PUBLIC_API_URL, TRADE_API_URL};
pub use error::{RestError, RestResult};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

// Re-export for users
pub use wex_auth::{AuthError, Credentials};
pub use wex_types::*;
