//! Main REST client implementation

use std::sync::Arc;

use tokenomy_auth::Environment;
use tokenomy_types::{DecimalValue, PairRegistry, TradeType};
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::RestResult;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    CancelResult, MarketInfo, MarketSummaries, OpenOrders, Order, OrderBook, OrderHistory,
    PublicTrade, Ticker, TradeHistory, TradeHistoryQuery, TradeRequest, TradeResult,
    TransactionHistory, UserInfo, WithdrawRequest, WithdrawResult,
};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Tokenomy REST API client
///
/// Provides access to both public and private endpoints. Private calls fail
/// with [`RestError::Unauthenticated`](crate::RestError::Unauthenticated)
/// unless the environment carries a token and a secret.
///
/// # Example
///
/// ```no_run
/// use tokenomy_rest::{Environment, TokenomyClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Token and secret from TOKENOMY_TOKEN / TOKENOMY_SECRET
///     let client = TokenomyClient::new(Environment::new("", ""))?;
///
///     let ticker = client.get_ticker("ten_btc").await?;
///     println!("last: {}", ticker.last);
///
///     let info = client.get_user_info().await?;
///     println!("btc: {}", info.assets.available("btc"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TokenomyClient {
    dispatcher: Dispatcher,
}

impl TokenomyClient {
    /// Create a client with the default configuration
    pub fn new(env: Environment) -> RestResult<Self> {
        Self::with_config(env, ClientConfig::default())
    }

    /// Create a client configured from the process environment only
    pub fn from_env() -> RestResult<Self> {
        Self::new(Environment::new("", ""))
    }

    /// Create a client with custom configuration
    pub fn with_config(env: Environment, config: ClientConfig) -> RestResult<Self> {
        let transport = HttpTransport::new(&env, &config)?;

        if env.debug().logs_config() {
            info!(
                address = transport.address(),
                authenticated = env.has_credentials(),
                timeout_secs = config.timeout_secs,
                "Created Tokenomy REST client"
            );
        }

        Ok(Self::with_transport(env, Arc::new(transport)))
    }

    /// Create a client over a custom transport
    pub fn with_transport(env: Environment, transport: Arc<dyn Transport>) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport, PairRegistry::supported(), env),
        }
    }

    /// Replace the pair registry
    pub fn with_registry(mut self, registry: PairRegistry) -> Self {
        self.dispatcher.set_registry(registry);
        self
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.environment().has_credentials()
    }

    /// Pairs this client accepts
    pub fn registry(&self) -> &PairRegistry {
        self.dispatcher.registry()
    }

    pub fn environment(&self) -> &Environment {
        self.dispatcher.environment()
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.dispatcher)
    }

    /// Get the 24h ticker of a pair
    ///
    /// # Arguments
    /// * `pair` - Pair id (e.g., "ten_btc")
    pub async fn get_ticker(&self, pair: &str) -> RestResult<Ticker> {
        self.market().get_ticker(pair).await
    }

    /// Get recent public trades of a pair
    pub async fn get_trades(&self, pair: &str) -> RestResult<Vec<PublicTrade>> {
        self.market().get_trades(pair).await
    }

    /// Get the order book of a pair
    pub async fn get_order_book(&self, pair: &str) -> RestResult<OrderBook> {
        self.market().get_order_book(pair).await
    }

    /// Get tickers of every market
    pub async fn get_market_summaries(&self) -> RestResult<MarketSummaries> {
        self.market().get_summaries().await
    }

    /// Get the static description of every market
    pub async fn get_market_info(&self) -> RestResult<Vec<MarketInfo>> {
        self.market().get_market_info().await
    }

    /// Build a pair registry from the markets the exchange currently lists
    ///
    /// Use with [`with_registry`](Self::with_registry) when the built-in table
    /// lags behind the exchange.
    pub async fn fetch_registry(&self) -> RestResult<PairRegistry> {
        let markets = self.get_market_info().await?;
        Ok(PairRegistry::from_pairs(
            markets.iter().map(MarketInfo::trading_pair),
        ))
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints
    ///
    /// Every call fails with `Unauthenticated` when the client has no
    /// credentials.
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(&self.dispatcher)
    }

    /// Get account details and balances
    pub async fn get_user_info(&self) -> RestResult<UserInfo> {
        self.account().get_user_info().await
    }

    /// Get open orders of a pair
    pub async fn list_open_orders(&self, pair: &str) -> RestResult<OpenOrders> {
        self.account().get_open_orders(pair).await
    }

    /// Get one order
    pub async fn get_order(&self, pair: &str, order_id: i64) -> RestResult<Order> {
        self.account().get_order(pair, order_id).await
    }

    /// Get order history of a pair
    pub async fn list_order_history(
        &self,
        pair: &str,
        count: Option<u32>,
        from: Option<i64>,
    ) -> RestResult<OrderHistory> {
        self.account().get_order_history(pair, count, from).await
    }

    /// Get the user's fills on a pair
    pub async fn list_trade_history(
        &self,
        pair: &str,
        query: &TradeHistoryQuery,
    ) -> RestResult<TradeHistory> {
        self.account().get_trade_history(pair, query).await
    }

    /// Get deposits and withdrawals
    pub async fn list_transaction_history(&self) -> RestResult<TransactionHistory> {
        self.account().get_transaction_history().await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(&self.dispatcher)
    }

    /// Place an order
    pub async fn place_trade(&self, order: &TradeRequest) -> RestResult<TradeResult> {
        self.trading().place_trade(order).await
    }

    /// Limit buy
    pub async fn buy(
        &self,
        pair: &str,
        amount: DecimalValue,
        price: DecimalValue,
    ) -> RestResult<TradeResult> {
        self.trading().buy(pair, amount, price).await
    }

    /// Limit sell
    pub async fn sell(
        &self,
        pair: &str,
        amount: DecimalValue,
        price: DecimalValue,
    ) -> RestResult<TradeResult> {
        self.trading().sell(pair, amount, price).await
    }

    /// Market buy, spending `amount` of the quote asset
    pub async fn buy_by_market(&self, pair: &str, amount: DecimalValue) -> RestResult<TradeResult> {
        self.trading().buy_by_market(pair, amount).await
    }

    /// Market sell `amount` of the base asset
    pub async fn sell_by_market(&self, pair: &str, amount: DecimalValue) -> RestResult<TradeResult> {
        self.trading().sell_by_market(pair, amount).await
    }

    /// Cancel an order
    pub async fn cancel_order(
        &self,
        pair: &str,
        order_id: i64,
        trade_type: TradeType,
    ) -> RestResult<CancelResult> {
        self.trading().cancel_order(pair, order_id, trade_type).await
    }

    /// Cancel a buy order
    pub async fn cancel_buy(&self, pair: &str, order_id: i64) -> RestResult<CancelResult> {
        self.trading().cancel_buy(pair, order_id).await
    }

    /// Cancel a sell order
    pub async fn cancel_sell(&self, pair: &str, order_id: i64) -> RestResult<CancelResult> {
        self.trading().cancel_sell(pair, order_id).await
    }

    // ========================================================================
    // Private Funding Endpoints
    // ========================================================================

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(&self.dispatcher)
    }

    /// Withdraw to an external address
    pub async fn withdraw(&self, request: &WithdrawRequest) -> RestResult<WithdrawResult> {
        self.funding().withdraw(request).await
    }
}

impl std::fmt::Debug for TokenomyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenomyClient")
            .field("address", &self.environment().address())
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Server address, overriding the environment's
    pub address: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            address: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set server address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenomy_auth::Credentials;

    #[test]
    fn test_client_without_credentials() {
        let client = TokenomyClient::new(Environment::public()).unwrap();
        assert!(!client.has_credentials());
        assert_eq!(client.registry().len(), 36);
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.address, None);
    }

    #[test]
    fn test_debug_hides_credentials() {
        let env = Environment::public().with_credentials(Credentials::new("tok", "hidden").unwrap());
        let client = TokenomyClient::new(env).unwrap();
        let debug = format!("{:?}", client);

        assert!(debug.contains("has_credentials: true"));
        assert!(!debug.contains("hidden"));
    }

    #[test]
    fn test_custom_registry() {
        let client = TokenomyClient::new(Environment::public())
            .unwrap()
            .with_registry(PairRegistry::from_pairs([tokenomy_types::TradingPair::new(
                "new_btc", "new", "btc",
            )]));

        assert!(client.registry().is_valid("new_btc"));
        assert!(!client.registry().is_valid("ten_btc"));
    }
}
