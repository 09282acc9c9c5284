//! Trade API endpoints
//!
//! All trade calls are signed POSTs to a single endpoint, with the method name
//! in the body. These require credentials. The nonce is drawn and the body
//! signed before anything is sent, so a nonce failure never reaches the
//! network.

use crate::envelope::{self, Segment};
use crate::error::RestResult;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use wex_auth::RequestSigner;
use wex_types::{CancelOrder, OrderSide, TradeOrder, TradeOrders, UserInfo, UserTrade, Withdraw};

/// Trade API endpoints
pub struct TradeEndpoints<'a> {
    transport: &'a dyn HttpTransport,
    signer: &'a RequestSigner,
    url: &'a str,
}

impl<'a> TradeEndpoints<'a> {
    pub fn new(transport: &'a dyn HttpTransport, signer: &'a RequestSigner, url: &'a str) -> Self {
        Self {
            transport,
            signer,
            url,
        }
    }

    /// Get balances, key rights and the number of open orders
    #[instrument(skip(self))]
    pub async fn get_info(&self) -> RestResult<UserInfo> {
        self.post("getInfo", &[]).await
    }

    /// Place a limit order
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "btc_usd")
    /// * `side` - Buy or sell
    /// * `rate` - Limit price
    /// * `amount` - Amount to buy or sell
    #[instrument(skip(self))]
    pub async fn trade(
        &self,
        pair: &str,
        side: OrderSide,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<UserTrade> {
        let rate = rate.to_string();
        let amount = amount.to_string();

        self.post(
            "Trade",
            &[
                ("pair", pair),
                ("type", side.as_str()),
                ("rate", rate.as_str()),
                ("amount", amount.as_str()),
            ],
        )
        .await
    }

    /// Get open orders for a pair
    #[instrument(skip(self))]
    pub async fn active_orders(&self, pair: &str) -> RestResult<TradeOrders> {
        self.post("ActiveOrders", &[("pair", pair)]).await
    }

    /// Get one order by ID
    ///
    /// An ID missing from the response yields a zero-valued order carrying
    /// only the requested ID.
    #[instrument(skip(self))]
    pub async fn order_info(&self, order_id: u64) -> RestResult<TradeOrder> {
        let id = order_id.to_string();
        let orders: TradeOrders = self.post("OrderInfo", &[("order_id", id.as_str())]).await?;

        match orders.into_iter().find(|o| o.id == order_id) {
            Some(order) => Ok(order),
            None => {
                debug!(order_id, "Order missing from response");
                Ok(TradeOrder {
                    id: order_id,
                    ..TradeOrder::default()
                })
            }
        }
    }

    /// Cancel an order by ID
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<CancelOrder> {
        let id = order_id.to_string();
        self.post("CancelOrder", &[("order_id", id.as_str())]).await
    }

    /// Withdraw coins to an external address
    ///
    /// Needs a key with withdrawal rights.
    #[instrument(skip(self, address))]
    pub async fn withdraw_coin(
        &self,
        currency: &str,
        address: &str,
        amount: Decimal,
    ) -> RestResult<Withdraw> {
        let amount = amount.to_string();
        self.post(
            "WithdrawCoin",
            &[("coinName", currency), ("address", address), ("amount", amount.as_str())],
        )
        .await
    }

    async fn post<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> RestResult<T> {
        let signed = self.signer.sign(method, params)?;

        let headers = signed
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .to_vec();

        debug!(method, nonce = signed.nonce, "Sending trade request");

        let request = HttpRequest {
            method: HttpMethod::Post,
            url: self.url.to_string(),
            headers,
            body: Some(signed.body),
        };

        let response = self.transport.execute(request).await?;
        envelope::decode(&response, Segment::Return)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestError;
    use crate::transport::MockTransport;
    use rust_decimal_macros::dec;
    use wex_auth::{sign_payload, Credentials, NonceGenerator};

    const URL: &str = "http://mock/tapi";

    fn signer(first: u64) -> RequestSigner {
        RequestSigner::with_nonces(
            Credentials::new("API_KEY", "API_SECRET"),
            NonceGenerator::starting_at(first),
        )
    }

    #[tokio::test]
    async fn test_trade_request_layout() {
        let transport = MockTransport::new();
        transport.push_ok(
            r#"{"success":1,"return":{"received":0.1,"remains":0,"order_id":0,
            "funds":{"usd":325,"btc":2.498,"ltc":0}}}"#,
        );
        let signer = signer(42);

        let result = TradeEndpoints::new(&transport, &signer, URL)
            .trade("btc_usd", OrderSide::Buy, dec!(100.5), dec!(0.1))
            .await
            .unwrap();

        assert_eq!(result.received, dec!(0.1));
        assert_eq!(result.order_id, 0);
        assert_eq!(result.funds.get("btc"), Some(dec!(2.498)));

        let request = &transport.requests()[0];
        let body = "method=Trade&nonce=42&pair=btc_usd&type=buy&rate=100.5&amount=0.1";
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, URL);
        assert_eq!(request.body.as_deref(), Some(body));

        let expected = sign_payload(
            signer.credentials(),
            "Trade",
            42,
            &[("pair", "btc_usd"), ("type", "buy"), ("rate", "100.5"), ("amount", "0.1")],
        )
        .unwrap();
        assert_eq!(request.header("Key"), Some("API_KEY"));
        assert_eq!(request.header("Sign"), Some(expected.signature.as_str()));
        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
    }

    #[tokio::test]
    async fn test_order_info_missing_id() {
        let transport = MockTransport::new();
        transport.push_ok(r#"{"success":1,"return":{}}"#);
        let signer = signer(1);

        let order = TradeEndpoints::new(&transport, &signer, URL)
            .order_info(99)
            .await
            .unwrap();

        assert_eq!(order.id, 99);
        assert!(order.pair.is_empty());
        assert!(order.amount.is_zero());
        assert_eq!(
            transport.requests()[0].body.as_deref(),
            Some("method=OrderInfo&nonce=1&order_id=99")
        );
    }

    #[tokio::test]
    async fn test_withdraw_params() {
        let transport = MockTransport::new();
        transport.push_ok(
            r#"{"success":1,"return":{"tId":37832629,"amountSent":0.009,"funds":{"btc":24.998}}}"#,
        );
        let signer = signer(3);

        let withdraw = TradeEndpoints::new(&transport, &signer, URL)
            .withdraw_coin("BTC", "1Addr", dec!(0.01))
            .await
            .unwrap();

        assert_eq!(withdraw.trade_id, 37832629);
        assert_eq!(
            transport.requests()[0].body.as_deref(),
            Some("method=WithdrawCoin&nonce=3&coinName=BTC&address=1Addr&amount=0.01")
        );
    }

    #[tokio::test]
    async fn test_exhausted_nonce_sends_nothing() {
        let transport = MockTransport::new();
        let signer = RequestSigner::with_nonces(
            Credentials::new("API_KEY", "API_SECRET"),
            NonceGenerator::starting_at(10).with_max(10),
        );

        let err = TradeEndpoints::new(&transport, &signer, URL)
            .get_info()
            .await
            .unwrap_err();

        assert!(matches!(err, RestError::Auth(_)));
        assert!(err.requires_key_rotation());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_api_error_consumes_nonce() {
        let transport = MockTransport::new();
        transport.push_ok(r#"{"success":0,"error":"invalid nonce parameter"}"#);
        let signer = signer(5);

        let err = TradeEndpoints::new(&transport, &signer, URL)
            .cancel_order(1)
            .await
            .unwrap_err();

        assert_eq!(err.api_message(), Some("invalid nonce parameter"));
        assert_eq!(signer.nonces().peek(), 6);
    }
}
