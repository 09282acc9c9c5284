//! Public market data payloads

use crate::wire::{boolean, decimal, timestamp, WireDecimal};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Pair Info
// ============================================================================

/// Response of the `info` method
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InfoResponse {
    /// Server time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub server_time: DateTime<Utc>,
    /// Active pairs keyed by pair name (e.g. `btc_usd`)
    pub pairs: HashMap<String, PairInfo>,
}

/// Trading rules for one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PairInfo {
    /// Digits allowed after the decimal point
    pub decimal_places: u32,
    /// Minimum price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub min_price: Decimal,
    /// Maximum price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub max_price: Decimal,
    /// Minimum order amount
    #[serde(deserialize_with = "decimal::deserialize")]
    pub min_amount: Decimal,
    /// Commission, in percent
    #[serde(deserialize_with = "decimal::deserialize")]
    pub fee: Decimal,
    /// Whether the pair is hidden
    #[serde(default, deserialize_with = "boolean::deserialize")]
    pub hidden: bool,
}

// ============================================================================
// Ticker
// ============================================================================

/// Ticker for one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Market {
    /// Highest price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub high: Decimal,
    /// Lowest price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub low: Decimal,
    /// Average price
    #[serde(rename = "avg", deserialize_with = "decimal::deserialize")]
    pub average: Decimal,
    /// Trade volume
    #[serde(rename = "vol", deserialize_with = "decimal::deserialize")]
    pub volume: Decimal,
    /// Trade volume in the quote currency
    #[serde(rename = "vol_cur", deserialize_with = "decimal::deserialize")]
    pub volume_in_currency: Decimal,
    /// Price of the last trade
    #[serde(deserialize_with = "decimal::deserialize")]
    pub last: Decimal,
    /// Buy price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub buy: Decimal,
    /// Sell price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub sell: Decimal,
    /// Last update of the cache
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated: DateTime<Utc>,
}

impl Market {
    /// Mid price between buy and sell
    pub fn mid_price(&self) -> Decimal {
        (self.buy + self.sell) / Decimal::TWO
    }
}

// ============================================================================
// Depth
// ============================================================================

/// One resting order at a price level
///
/// Sent as a `[rate, amount]` pair; `total` is derived while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Order {
    /// Price
    pub rate: Decimal,
    /// Amount at this price
    pub amount: Decimal,
    /// `rate * amount`
    pub total: Decimal,
}

impl Order {
    /// Build an order and compute its total.
    ///
    /// Returns `None` if `rate * amount` overflows.
    pub fn from_parts(rate: Decimal, amount: Decimal) -> Option<Self> {
        let mut order = Self {
            rate,
            amount,
            total: Decimal::ZERO,
        };
        order.calculate_total()?;
        Some(order)
    }

    /// Recompute `total` from `rate` and `amount`.
    ///
    /// A zero amount leaves the total at zero.
    pub fn calculate_total(&mut self) -> Option<Decimal> {
        if self.amount.is_zero() {
            self.total = Decimal::ZERO;
            return Some(self.total);
        }
        self.total = self.rate.checked_mul(self.amount)?;
        Some(self.total)
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderVisitor)
    }
}

struct OrderVisitor;

impl<'de> Visitor<'de> for OrderVisitor {
    type Value = Order;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [rate, amount] array")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Order, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let rate: WireDecimal = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let amount: WireDecimal = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(3, &self));
        }

        Order::from_parts(rate.0, amount.0)
            .ok_or_else(|| de::Error::custom(format!("order total overflows: {} * {}", rate.0, amount.0)))
    }
}

/// Order book for one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    /// Sell orders, best first
    pub asks: Vec<Order>,
    /// Buy orders, best first
    pub bids: Vec<Order>,
}

impl OrderBook {
    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|o| o.rate)
    }

    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|o| o.rate)
    }

    /// Spread between best ask and best bid
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

// ============================================================================
// Trades
// ============================================================================

/// Side of a public trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Trade executed against an ask
    Ask,
    /// Trade executed against a bid
    Bid,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "ask"),
            Self::Bid => write!(f, "bid"),
        }
    }
}

/// One public trade
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Trade {
    /// Trade ID
    #[serde(rename = "tid")]
    pub id: u64,
    /// `ask` or `bid`
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    /// Price
    #[serde(rename = "price", deserialize_with = "decimal::deserialize")]
    pub rate: Decimal,
    /// Amount
    #[serde(deserialize_with = "decimal::deserialize")]
    pub amount: Decimal,
    /// Execution time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}
