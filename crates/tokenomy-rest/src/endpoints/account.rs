//! Account endpoints for balances, orders and history
//!
//! These endpoints require authentication.

use crate::dispatch::Dispatcher;
use crate::error::RestResult;
use crate::request::{Operation, Params};
use crate::types::{
    OpenOrders, OpenOrdersPayload, Order, OrderHistory, OrderPayload, TradeHistory,
    TradeHistoryQuery, TransactionHistory, UserInfo,
};
use tracing::{debug, instrument};

/// Account endpoints
pub struct AccountEndpoints<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Get account details and balances
    ///
    /// # Returns
    /// User info with available and frozen balances split apart
    #[instrument(skip(self))]
    pub async fn get_user_info(&self) -> RestResult<UserInfo> {
        debug!("Fetching user info");

        self.dispatcher
            .private(Operation::GetUserInfo, None, Params::new())
            .await
    }

    /// Get open orders of a pair, grouped by pair id
    #[instrument(skip(self))]
    pub async fn get_open_orders(&self, pair: &str) -> RestResult<OpenOrders> {
        debug!("Fetching open orders");

        let payload: OpenOrdersPayload = self
            .dispatcher
            .private(Operation::GetOpenOrders, Some(pair), Params::new())
            .await?;

        Ok(payload.into_open_orders(pair))
    }

    /// Get one order
    #[instrument(skip(self))]
    pub async fn get_order(&self, pair: &str, order_id: i64) -> RestResult<Order> {
        let mut params = Params::new();
        params.insert("order_id".to_string(), order_id.to_string());

        debug!("Fetching order");

        let payload: OrderPayload = self
            .dispatcher
            .private(Operation::GetOrder, Some(pair), params)
            .await?;

        Ok(payload.order)
    }

    /// Get order history of a pair
    ///
    /// # Arguments
    /// * `pair` - Pair id
    /// * `count` - Maximum number of orders
    /// * `from` - Start from this order id
    #[instrument(skip(self))]
    pub async fn get_order_history(
        &self,
        pair: &str,
        count: Option<u32>,
        from: Option<i64>,
    ) -> RestResult<OrderHistory> {
        let mut params = Params::new();
        if let Some(count) = count {
            params.insert("count".to_string(), count.to_string());
        }
        if let Some(from) = from {
            params.insert("from".to_string(), from.to_string());
        }

        debug!("Fetching order history");

        self.dispatcher
            .private(Operation::GetOrderHistory, Some(pair), params)
            .await
    }

    /// Get the user's fills on a pair
    ///
    /// Each fill's base and quote amounts are resolved from the pair; any
    /// other field the exchange adds is kept in [`UserTrade::extra`].
    ///
    /// [`UserTrade::extra`]: crate::types::UserTrade::extra
    #[instrument(skip(self))]
    pub async fn get_trade_history(
        &self,
        pair: &str,
        query: &TradeHistoryQuery,
    ) -> RestResult<TradeHistory> {
        let market = self.dispatcher.registry().validate(pair)?;
        debug!("Fetching trade history");

        let history: TradeHistory = self
            .dispatcher
            .private(Operation::GetTradeHistory, Some(pair), query.to_params())
            .await?;

        Ok(history.collect_amounts(market)?)
    }

    /// Get deposits and withdrawals of every asset
    #[instrument(skip(self))]
    pub async fn get_transaction_history(&self) -> RestResult<TransactionHistory> {
        debug!("Fetching transaction history");

        self.dispatcher
            .private(Operation::GetTransactionHistory, None, Params::new())
            .await
    }
}
