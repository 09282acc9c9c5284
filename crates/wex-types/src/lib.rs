//! Payload types for the WEX REST API
//!
//! This crate holds the typed shapes returned by the public (`/api/3`) and
//! trade (`/tapi`) APIs, plus the [`wire`] adapters that decode WEX's
//! irregular JSON: 0/1 booleans, integer timestamps, `[rate, amount]`
//! order arrays and objects keyed by numeric order IDs.
//!
//! All monetary values are [`Decimal`] and are parsed from the raw JSON
//! literal, so the scale sent by the server is preserved.
//!
//! # Key Types
//!
//! - [`Market`], [`OrderBook`], [`Order`], [`Trade`], [`InfoResponse`] - public data
//! - [`UserInfo`], [`UserTrade`], [`TradeOrders`], [`CancelOrder`], [`Withdraw`] - trade API

pub mod account;
pub mod market;
pub mod wire;

pub use account::*;
pub use market::*;

// Re-export for users
pub use chrono::{DateTime, Utc};
pub use rust_decimal::Decimal;
