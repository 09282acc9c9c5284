//! Adapters for WEX's non-standard JSON encodings
//!
//! Each submodule exposes a `deserialize` function meant for
//! `#[serde(deserialize_with = "...")]`:
//!
//! - [`boolean`] - flags sent as `0`/`1`/`"0"`/`"1"`/`true`/`false`
//! - [`timestamp`] - integer seconds since the Unix epoch
//! - [`decimal`] - exact decimals parsed from the raw literal
//! - [`id_keyed`] - objects keyed by numeric ID, flattened into a list

pub mod boolean;
pub mod decimal;
pub mod id_keyed;
pub mod timestamp;

pub use decimal::WireDecimal;
pub use id_keyed::WithId;
