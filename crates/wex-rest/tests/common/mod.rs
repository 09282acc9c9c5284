//! Common test utilities and fixtures for integration tests
//!
//! Contains sample payloads in the shape served by the WEX public and trade
//! APIs, plus a scripted transport standing in for the network.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use wex_rest::{
    ClientConfig, Credentials, HttpRequest, HttpResponse, HttpTransport, TransportError, WexClient,
};

pub const PUBLIC_URL: &str = "http://wex.test/api/3";
pub const TRADE_URL: &str = "http://wex.test/tapi";

pub const API_KEY: &str = "API_KEY";
pub const API_SECRET: &str = "API_SECRET";

/// Application error, as sent by both APIs
pub const INVALID_METHOD_RESPONSE: &str = r#"{"success":0, "error":"Invalid method"}"#;

/// Envelope is fine, payload is not an object
pub const INVALID_RETURN_RESPONSE: &str = r#"{"success":1,"return":"//"}"#;

pub const INFO_RESPONSE: &str = r#"{
    "server_time":1370814956,
    "pairs":{
        "btc_usd":{
            "decimal_places":3,
            "min_price":0.1,
            "max_price":400,
            "min_amount":0.01,
            "hidden":0,
            "fee":0.2
        }
    }
}"#;

pub const TICKER_RESPONSE: &str = r#"{
    "btc_usd":{
        "high":109.88,
        "low":91.14,
        "avg":100.51,
        "vol":1632898.2249,
        "vol_cur":16541.51969,
        "last":101.773,
        "buy":101.9,
        "sell":101.773,
        "updated":1370816308
    }
}"#;

pub const DEPTH_RESPONSE: &str = r#"{
    "btc_usd":{
        "asks":[
            [103.426,0.01]
        ],
        "bids":[
            [103.2,2.48502251]
        ]
    }
}"#;

pub const TRADES_RESPONSE: &str = r#"{
    "btc_usd":[
        {
            "type":"ask",
            "price":103.6,
            "amount":0.101,
            "tid":4861261,
            "timestamp":1370818007
        }
    ]
}"#;

pub const GET_INFO_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "funds":{
            "usd":325,
            "btc":23.998,
            "ltc":0
        },
        "rights":{
            "info":1,
            "trade":0,
            "withdraw":0
        },
        "transaction_count":0,
        "open_orders":1,
        "server_time":1342123547
    }
}"#;

pub const TRADE_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "received":0.1,
        "remains":0,
        "order_id":0,
        "funds":{
            "usd":325,
            "btc":2.498,
            "ltc":0
        }
    }
}"#;

pub const ACTIVE_ORDERS_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "343152":{
            "pair":"btc_usd",
            "type":"sell",
            "amount":12.345,
            "rate":485,
            "timestamp_created":1342448420,
            "status":0
        }
    }
}"#;

pub const ORDER_INFO_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "343152":{
            "pair":"btc_usd",
            "type":"sell",
            "start_amount":13.345,
            "amount":12.345,
            "rate":485,
            "timestamp_created":1342448420,
            "status":0
        }
    }
}"#;

pub const CANCEL_ORDER_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "order_id":343154,
        "funds":{
            "usd":325,
            "btc":24.998,
            "ltc":0
        }
    }
}"#;

pub const WITHDRAW_RESPONSE: &str = r#"{
    "success":1,
    "return":{
        "tId":37832629,
        "amountSent":0.009,
        "funds":{
            "usd":325,
            "btc":24.998,
            "ltc":0
        }
    }
}"#;

/// Transport that replays canned responses and records requests
///
/// When the script runs out, the last response is repeated.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    last: Mutex<Option<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Transport that answers every request with `body`
    pub fn always(body: &str) -> Arc<Self> {
        let transport = Self::new();
        transport.respond(200, body);
        transport
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.script
            .lock()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub fn fail(&self, error: TransportError) {
        self.script.lock().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);

        let next = self.script.lock().pop_front();
        match next {
            Some(Ok(response)) => {
                *self.last.lock() = Some(response.clone());
                Ok(response)
            }
            Some(Err(error)) => Err(error),
            None => self
                .last
                .lock()
                .clone()
                .ok_or_else(|| TransportError::Request("connection refused".into())),
        }
    }
}

/// Configuration pointing at the scripted endpoints
pub fn test_config() -> ClientConfig {
    ClientConfig::new()
        .with_public_url(PUBLIC_URL)
        .with_trade_url(TRADE_URL)
}

/// Public-only client over `transport`
pub fn public_client(transport: Arc<ScriptedTransport>) -> WexClient {
    WexClient::with_transport(test_config(), transport).expect("client")
}

/// Authenticated client whose first nonce is `first_nonce`
pub fn trade_client(transport: Arc<ScriptedTransport>, first_nonce: u64) -> WexClient {
    let config = test_config()
        .with_credentials(Credentials::new(API_KEY, API_SECRET))
        .with_first_nonce(first_nonce);
    WexClient::with_transport(config, transport).expect("client")
}

/// Extract the `nonce` field from a signed form body
pub fn nonce_of(request: &HttpRequest) -> u64 {
    request
        .body
        .as_deref()
        .and_then(|body| {
            body.split('&')
                .find_map(|pair| pair.strip_prefix("nonce="))
                .and_then(|n| n.parse().ok())
        })
        .expect("nonce in body")
}
