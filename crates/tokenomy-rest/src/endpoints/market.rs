//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::{Operation, Params};
use crate::types::{MarketInfo, MarketSummaries, OrderBook, PublicTrade, Ticker, TickerPayload};
use tracing::{debug, instrument};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get the 24h ticker of a pair
    ///
    /// # Arguments
    /// * `pair` - Pair id (e.g., "ten_btc")
    #[instrument(skip(self))]
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Ticker> {
        debug!("Fetching ticker");

        let payload: TickerPayload = self
            .dispatcher
            .public(Operation::GetTicker, Some(pair), Params::new())
            .await?;

        Ok(payload.ticker)
    }

    /// Get recent public trades of a pair
    #[instrument(skip(self))]
    pub async fn get_trades(&self, pair: &str) -> RestResult<Vec<PublicTrade>> {
        debug!("Fetching trades");

        self.dispatcher
            .public(Operation::GetTrades, Some(pair), Params::new())
            .await
    }

    /// Get the order book of a pair
    #[instrument(skip(self))]
    pub async fn get_order_book(&self, pair: &str) -> RestResult<OrderBook> {
        debug!("Fetching order book");

        self.dispatcher
            .public(Operation::GetOrderBook, Some(pair), Params::new())
            .await
    }

    /// Get tickers and reference prices of every market
    #[instrument(skip(self))]
    pub async fn get_summaries(&self) -> RestResult<MarketSummaries> {
        debug!("Fetching market summaries");

        self.dispatcher
            .public(Operation::GetMarketSummaries, None, Params::new())
            .await
    }

    /// Get the static description of every market
    #[instrument(skip(self))]
    pub async fn get_market_info(&self) -> RestResult<Vec<MarketInfo>> {
        debug!("Fetching market info");

        self.dispatcher
            .public(Operation::GetMarketInfo, None, Params::new())
            .await
    }
}
