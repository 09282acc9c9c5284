//! API endpoint implementations

pub mod public;
pub mod trade;

pub use public::PublicEndpoints;
pub use trade::TradeEndpoints;
