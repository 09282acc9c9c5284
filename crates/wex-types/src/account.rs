//! Trade API payloads

use crate::wire::{boolean, decimal, id_keyed, timestamp, WithId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Account
// ============================================================================

/// Balances available for trading, keyed by currency (`usd`, `btc`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Funds(#[serde(deserialize_with = "decimal::deserialize_map")] pub HashMap<String, Decimal>);

impl Funds {
    /// Balance for a currency
    pub fn get(&self, currency: &str) -> Option<Decimal> {
        self.0.get(currency).copied()
    }

    /// All non-zero balances
    pub fn non_zero(&self) -> HashMap<String, Decimal> {
        self.0
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(currency, amount)| (currency.clone(), *amount))
            .collect()
    }

    /// Iterate over all balances
    pub fn iter(&self) -> impl Iterator<Item = (&String, Decimal)> {
        self.0.iter().map(|(currency, amount)| (currency, *amount))
    }
}

/// Privileges of the API key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Rights {
    /// May read account info
    #[serde(deserialize_with = "boolean::deserialize")]
    pub info: bool,
    /// May trade
    #[serde(deserialize_with = "boolean::deserialize")]
    pub trade: bool,
    /// May withdraw
    #[serde(deserialize_with = "boolean::deserialize")]
    pub withdraw: bool,
}

/// Result of `getInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    /// Balances
    pub funds: Funds,
    /// Key privileges
    pub rights: Rights,
    /// Deprecated by WEX, always 0
    pub transaction_count: u64,
    /// Number of open orders
    pub open_orders: u64,
    /// Server time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub server_time: DateTime<Utc>,
}

// ============================================================================
// Orders
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    #[default]
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `Trade`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserTrade {
    /// Amount bought/sold immediately
    #[serde(deserialize_with = "decimal::deserialize")]
    pub received: Decimal,
    /// Amount left on the book
    #[serde(deserialize_with = "decimal::deserialize")]
    pub remains: Decimal,
    /// ID of the resting order, 0 when fully filled
    pub order_id: u64,
    /// Balances after the trade
    #[serde(default)]
    pub funds: Funds,
}

/// One of the user's orders
///
/// The ID is not part of the JSON body; it comes from the key of the
/// enclosing collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TradeOrder {
    /// Order ID
    #[serde(skip)]
    pub id: u64,
    /// Pair (e.g. `btc_usd`)
    pub pair: String,
    /// Buy or sell
    #[serde(rename = "type")]
    pub order_type: OrderSide,
    /// Amount at creation, only reported by `OrderInfo`
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub start_amount: Decimal,
    /// Remaining amount
    #[serde(deserialize_with = "decimal::deserialize")]
    pub amount: Decimal,
    /// Price
    #[serde(deserialize_with = "decimal::deserialize")]
    pub rate: Decimal,
    /// Creation time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp_created: DateTime<Utc>,
    /// 0 active, 1 filled, 2 cancelled, 3 partially filled then cancelled
    #[serde(default)]
    pub status: u32,
}

impl WithId for TradeOrder {
    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// Orders decoded from an ID-keyed object
///
/// Order is not guaranteed; use [`TradeOrders::sorted_by_id`] when it matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TradeOrders(#[serde(deserialize_with = "id_keyed::deserialize")] pub Vec<TradeOrder>);

impl TradeOrders {
    /// Number of orders
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no orders
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the orders
    pub fn iter(&self) -> std::slice::Iter<'_, TradeOrder> {
        self.0.iter()
    }

    /// Find an order by ID
    pub fn get(&self, id: u64) -> Option<&TradeOrder> {
        self.0.iter().find(|o| o.id == id)
    }

    /// Orders sorted by ascending ID
    pub fn sorted_by_id(mut self) -> Vec<TradeOrder> {
        self.0.sort_by_key(|o| o.id);
        self.0
    }
}

impl IntoIterator for TradeOrders {
    type Item = TradeOrder;
    type IntoIter = std::vec::IntoIter<TradeOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of `CancelOrder`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CancelOrder {
    /// Cancelled order ID
    pub order_id: u64,
    /// Balances after cancellation
    #[serde(default)]
    pub funds: Funds,
}

// ============================================================================
// Withdrawals
// ============================================================================

/// Result of `WithdrawCoin`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Withdraw {
    /// Transaction ID
    #[serde(rename = "tId")]
    pub trade_id: u64,
    /// Amount sent, fees deducted
    #[serde(rename = "amountSent", deserialize_with = "decimal::deserialize")]
    pub amount_sent: Decimal,
    /// Balances after the withdrawal
    #[serde(default)]
    pub funds: Funds,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ORDERS: &str = r#"{
        "343152": {
            "pair": "btc_usd",
            "type": "sell",
            "start_amount": 13.345,
            "amount": 12.345,
            "rate": 485,
            "timestamp_created": 1342448420,
            "status": 0
        }
    }"#;

    #[test]
    fn test_trade_orders_inject_id() {
        let orders: TradeOrders = serde_json::from_str(ORDERS).unwrap();
        assert_eq!(orders.len(), 1);

        let order = orders.get(343152).unwrap();
        assert_eq!(order.id, 343152);
        assert_eq!(order.pair, "btc_usd");
        assert_eq!(order.order_type, OrderSide::Sell);
        assert_eq!(order.start_amount, dec!(13.345));
        assert_eq!(order.amount, dec!(12.345));
        assert_eq!(order.rate, dec!(485));
        assert_eq!(order.timestamp_created.timestamp(), 1342448420);
        assert_eq!(order.status, 0);
    }

    #[test]
    fn test_trade_orders_sorted() {
        let orders: TradeOrders = serde_json::from_str(
            r#"{
                "9": {"pair":"ltc_usd","type":"buy","amount":1,"rate":2,"timestamp_created":1},
                "3": {"pair":"btc_usd","type":"sell","amount":1,"rate":2,"timestamp_created":1}
            }"#,
        )
        .unwrap();

        let ids: Vec<u64> = orders.sorted_by_id().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 9]);
    }

    #[test]
    fn test_trade_orders_reject_bad_key() {
        let err = serde_json::from_str::<TradeOrders>(
            r#"{"x1": {"pair":"btc_usd","type":"buy","amount":1,"rate":2,"timestamp_created":1}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("parse id x1"));
    }

    #[test]
    fn test_user_info_parsing() {
        let info: UserInfo = serde_json::from_str(
            r#"{
                "funds": {"usd": 325, "btc": 23.998, "ltc": 0},
                "rights": {"info": 1, "trade": 0, "withdraw": "0"},
                "transaction_count": 0,
                "open_orders": 1,
                "server_time": 1342123547
            }"#,
        )
        .unwrap();

        assert_eq!(info.funds.get("btc"), Some(dec!(23.998)));
        assert_eq!(info.funds.non_zero().len(), 2);
        assert!(info.rights.info);
        assert!(!info.rights.trade);
        assert!(!info.rights.withdraw);
        assert_eq!(info.open_orders, 1);
        assert_eq!(info.server_time.timestamp(), 1342123547);
    }

    #[test]
    fn test_withdraw_parsing() {
        let withdraw: Withdraw = serde_json::from_str(
            r#"{"tId": 37832629, "amountSent": 0.009, "funds": {"usd": 325, "btc": 24.998, "ltc": 0}}"#,
        )
        .unwrap();

        assert_eq!(withdraw.trade_id, 37832629);
        assert_eq!(withdraw.amount_sent, dec!(0.009));
        assert_eq!(withdraw.funds.get("btc"), Some(dec!(24.998)));
    }

    #[test]
    fn test_funds_optional() {
        let trade: UserTrade =
            serde_json::from_str(r#"{"received": 0.1, "remains": 0, "order_id": 0}"#).unwrap();
        assert_eq!(trade.received, dec!(0.1));
        assert_eq!(trade.funds, Funds::default());

        let withdraw: Withdraw =
            serde_json::from_str(r#"{"tId": 1, "amountSent": 0.009}"#).unwrap();
        assert_eq!(withdraw.amount_sent, dec!(0.009));
        assert!(withdraw.funds.iter().next().is_none());

        let cancelled: CancelOrder = serde_json::from_str(r#"{"order_id": 343154}"#).unwrap();
        assert_eq!(cancelled.order_id, 343154);
        assert_eq!(cancelled.funds, Funds::default());
    }

    #[test]
    fn test_order_side_wire_names() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderSide::Sell.as_str(), "sell");
        assert_eq!(serde_json::from_str::<OrderSide>(r#""sell""#).unwrap(), OrderSide::Sell);
    }
}
