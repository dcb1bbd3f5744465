//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::{Operation, Params};
use crate::types::{CancelResult, TradeRequest, TradeResult};
use tokenomy_types::{DecimalValue, TradeType};
use tracing::{debug, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Place an order
    ///
    /// Pair, amount and price are checked before anything is signed.
    ///
    /// # Returns
    /// Order id and the amounts filled immediately
    #[instrument(skip(self, order), fields(pair = %order.pair, side = %order.trade_type, order_type = %order.order_type))]
    pub async fn place_trade(&self, order: &TradeRequest) -> RestResult<TradeResult> {
        let pair = self.dispatcher.registry().validate(&order.pair)?;
        let params = order.to_params(pair)?;

        debug!(
            "Placing {} {} order for {} {}",
            order.trade_type,
            order.order_type,
            order.amount,
            order.amount_asset(pair)
        );

        self.dispatcher
            .private(Operation::PlaceTrade, Some(pair.id()), params)
            .await
    }

    /// Limit buy `amount` of the base asset at `price`
    pub async fn buy(
        &self,
        pair: &str,
        amount: DecimalValue,
        price: DecimalValue,
    ) -> RestResult<TradeResult> {
        self.place_trade(&TradeRequest::limit(pair, TradeType::Buy, amount, price))
            .await
    }

    /// Limit sell `amount` of the base asset at `price`
    pub async fn sell(
        &self,
        pair: &str,
        amount: DecimalValue,
        price: DecimalValue,
    ) -> RestResult<TradeResult> {
        self.place_trade(&TradeRequest::limit(pair, TradeType::Sell, amount, price))
            .await
    }

    /// Market buy, spending `amount` of the quote asset
    pub async fn buy_by_market(&self, pair: &str, amount: DecimalValue) -> RestResult<TradeResult> {
        self.place_trade(&TradeRequest::market(pair, TradeType::Buy, amount))
            .await
    }

    /// Market sell `amount` of the base asset
    pub async fn sell_by_market(&self, pair: &str, amount: DecimalValue) -> RestResult<TradeResult> {
        self.place_trade(&TradeRequest::market(pair, TradeType::Sell, amount))
            .await
    }

    /// Cancel an open order
    ///
    /// # Arguments
    /// * `pair` - Pair id the order was placed on
    /// * `order_id` - Order to cancel
    /// * `trade_type` - Side of the order
    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        pair: &str,
        order_id: i64,
        trade_type: TradeType,
    ) -> RestResult<CancelResult> {
        let mut params = Params::new();
        params.insert("order_id".to_string(), order_id.to_string());
        params.insert("type".to_string(), trade_type.to_string());

        debug!("Cancelling {} order {}", trade_type, order_id);

        self.dispatcher
            .private(Operation::CancelOrder, Some(pair), params)
            .await
    }

    /// Cancel an open buy order
    pub async fn cancel_buy(&self, pair: &str, order_id: i64) -> RestResult<CancelResult> {
        self.cancel_order(pair, order_id, TradeType::Buy).await
    }

    /// Cancel an open sell order
    pub async fn cancel_sell(&self, pair: &str, order_id: i64) -> RestResult<CancelResult> {
        self.cancel_order(pair, order_id, TradeType::Sell).await
    }
}
