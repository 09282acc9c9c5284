//! Main REST client implementation

use crate::endpoints::{PublicEndpoints, TradeEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::{HttpTransport, ReqwestTransport};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wex_auth::{Credentials, NonceGenerator, RequestSigner, MAX_NONCE};
use wex_types::{
    CancelOrder, InfoResponse, Market, OrderBook, OrderSide, Trade, TradeOrder, TradeOrders,
    UserInfo, UserTrade, Withdraw,
};

/// Public API base URL
pub const PUBLIC_API_URL: &str = "https://wex.nz/api/3";

/// Trade API endpoint
pub const TRADE_API_URL: &str = "https://wex.nz/tapi";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// WEX REST API client
///
/// Provides access to both public and trade endpoints. Clones share the
/// transport and the nonce counter.
///
/// # Example
///
/// ```no_run
/// use wex_rest::{Credentials, WexClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = WexClient::new()?;
///     let ticker = client.ticker("btc_usd").await?;
///     println!("last: {}", ticker.last);
///
///     // With authentication for trade endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = WexClient::with_credentials(creds)?;
///     let info = auth_client.get_info().await?;
///     println!("open orders: {}", info.open_orders);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WexClient {
    transport: Arc<dyn HttpTransport>,
    signer: Option<Arc<RequestSigner>>,
    public_url: String,
    trade_url: String,
}

impl WexClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::new().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("wex-rest/{}", env!("CARGO_PKG_VERSION")));
        let transport = ReqwestTransport::new(config.timeout, &user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport
    ///
    /// `timeout` and `user_agent` are the transport's business and are
    /// ignored here.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> RestResult<Self> {
        let signer = match config.credentials {
            Some(credentials) => {
                let nonces = match config.first_nonce {
                    Some(first) => NonceGenerator::starting_at(first),
                    None => NonceGenerator::new()?,
                }
                .with_max(config.nonce_max);
                Some(Arc::new(RequestSigner::with_nonces(credentials, nonces)))
            }
            None => None,
        };

        info!(
            authenticated = signer.is_some(),
            public_url = %config.public_url,
            trade_url = %config.trade_url,
            "Created WEX REST client"
        );

        Ok(Self {
            transport,
            signer,
            public_url: config.public_url,
            trade_url: config.trade_url,
        })
    }

    /// Check if the client has credentials for trade endpoints
    pub fn has_credentials(&self) -> bool {
        self.signer.is_some()
    }

    /// Next nonce the trade API will use, if authenticated
    pub fn next_nonce(&self) -> Option<u64> {
        self.signer.as_ref().map(|s| s.nonces().peek())
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> PublicEndpoints<'_> {
        PublicEndpoints::new(self.transport.as_ref(), &self.public_url)
    }

    /// Get server time and pair rules
    pub async fn info(&self) -> RestResult<InfoResponse> {
        self.market().info().await
    }

    /// Get the ticker for a pair (e.g. "btc_usd")
    pub async fn ticker(&self, pair: &str) -> RestResult<Market> {
        self.market().ticker(pair).await
    }

    /// Get the order book for a pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `limit` - Number of price levels per side (server default 150)
    pub async fn depth(&self, pair: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        self.market().depth(pair, limit).await
    }

    /// Get recent trades for a pair
    pub async fn trades(&self, pair: &str, limit: Option<u32>) -> RestResult<Vec<Trade>> {
        self.market().trades(pair, limit).await
    }

    // ========================================================================
    // Trade API Endpoints
    // ========================================================================

    /// Get trade endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradeEndpoints<'_>> {
        let signer = self.signer.as_deref().ok_or(RestError::AuthRequired)?;
        Ok(TradeEndpoints::new(self.transport.as_ref(), signer, &self.trade_url))
    }

    /// Get balances, key rights and open order count
    pub async fn get_info(&self) -> RestResult<UserInfo> {
        self.trading()?.get_info().await
    }

    /// Place a limit order
    pub async fn trade(
        &self,
        pair: &str,
        side: OrderSide,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<UserTrade> {
        self.trading()?.trade(pair, side, rate, amount).await
    }

    /// Get open orders for a pair
    pub async fn active_orders(&self, pair: &str) -> RestResult<TradeOrders> {
        self.trading()?.active_orders(pair).await
    }

    /// Get one order by ID
    pub async fn order_info(&self, order_id: u64) -> RestResult<TradeOrder> {
        self.trading()?.order_info(order_id).await
    }

    /// Cancel an order by ID
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<CancelOrder> {
        self.trading()?.cancel_order(order_id).await
    }

    /// Withdraw coins to an external address
    pub async fn withdraw_coin(
        &self,
        currency: &str,
        address: &str,
        amount: Decimal,
    ) -> RestResult<Withdraw> {
        self.trading()?.withdraw_coin(currency, address, amount).await
    }
}

impl std::fmt::Debug for WexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WexClient")
            .field("has_credentials", &self.has_credentials())
            .field("public_url", &self.public_url)
            .field("trade_url", &self.trade_url)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Public API base URL
    pub public_url: String,
    /// Trade API endpoint
    pub trade_url: String,
    /// Largest nonce the key may use
    pub nonce_max: u64,
    /// First nonce, instead of the current Unix time
    pub first_nonce: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            public_url: PUBLIC_API_URL.to_string(),
            trade_url: TRADE_API_URL.to_string(),
            nonce_max: MAX_NONCE,
            first_nonce: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Point the public API somewhere else (mirror, test server)
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Point the trade API somewhere else
    pub fn with_trade_url(mut self, url: impl Into<String>) -> Self {
        self.trade_url = url.into();
        self
    }

    /// Set the nonce ceiling
    pub fn with_nonce_max(mut self, max: u64) -> Self {
        self.nonce_max = max;
        self
    }

    /// Start nonces at a fixed value
    ///
    /// Useful when the last nonce used with a key is known to be ahead of
    /// the clock.
    pub fn with_first_nonce(mut self, first: u64) -> Self {
        self.first_nonce = Some(first);
        self
    }
}
