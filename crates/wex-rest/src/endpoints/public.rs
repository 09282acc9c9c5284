//! Public market data endpoints
//!
//! These endpoints don't require authentication. Every call is a single
//! `GET <base>/<method>[/<pair>][?limit=N]`; the server answers with an
//! object keyed by pair name, from which the requested pair is taken.

use crate::envelope::{self, Segment};
use crate::error::RestResult;
use crate::transport::{HttpRequest, HttpTransport, TransportError};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, instrument};
use wex_types::{InfoResponse, Market, OrderBook, Trade};

/// Public market data endpoints
pub struct PublicEndpoints<'a> {
    transport: &'a dyn HttpTransport,
    base_url: &'a str,
}

impl<'a> PublicEndpoints<'a> {
    pub fn new(transport: &'a dyn HttpTransport, base_url: &'a str) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Get server time and the rules of every active pair
    #[instrument(skip(self))]
    pub async fn info(&self) -> RestResult<InfoResponse> {
        self.get("info", None).await
    }

    /// Get the ticker for a pair
    ///
    /// A pair absent from the response yields a zero-valued ticker.
    #[instrument(skip(self))]
    pub async fn ticker(&self, pair: &str) -> RestResult<Market> {
        let tickers: HashMap<String, Market> = self.get(&format!("ticker/{}", pair), None).await?;
        Ok(take_pair(tickers, pair))
    }

    /// Get the order book for a pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g. "btc_usd")
    /// * `limit` - Levels per side, server default 150 (max 5000)
    #[instrument(skip(self))]
    pub async fn depth(&self, pair: &str, limit: Option<u32>) -> RestResult<OrderBook> {
        let books: HashMap<String, OrderBook> =
            self.get(&format!("depth/{}", pair), limit).await?;
        Ok(take_pair(books, pair))
    }

    /// Get the latest trades for a pair, newest first
    #[instrument(skip(self))]
    pub async fn trades(&self, pair: &str, limit: Option<u32>) -> RestResult<Vec<Trade>> {
        let trades: HashMap<String, Vec<Trade>> =
            self.get(&format!("trades/{}", pair), limit).await?;
        Ok(take_pair(trades, pair))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, limit: Option<u32>) -> RestResult<T> {
        let mut url = format!("{}/{}", self.base_url, path);

        if let Some(limit) = limit {
            let query = serde_urlencoded::to_string([("limit", limit)])
                .map_err(|e| TransportError::Build(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }

        debug!(%url, "Sending public request");

        let response = self.transport.execute(HttpRequest::get(url)).await?;
        envelope::decode(&response, Segment::Body)
    }
}

fn take_pair<T: Default>(mut by_pair: HashMap<String, T>, pair: &str) -> T {
    match by_pair.remove(pair) {
        Some(value) => value,
        None => {
            debug!(pair, "Pair missing from response");
            T::default()
        }
    }
}
