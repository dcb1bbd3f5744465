//! Types for Tokenomy REST API requests and responses
//!
//! Several payloads key amounts by asset ticker (`vol_btc`, `remain_ten`,
//! `receive_idk`, ...). Those fields are collected into maps keyed by the
//! bare ticker.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use tokenomy_types::{
    DecimalValue, MalformedNumber, OrderStatus, OrderType, SortOrder, TradeType, TradingPair,
    UserAssets,
};

use crate::error::{RestError, RestResult};
use crate::request::Params;

/// Amounts keyed by asset ticker
pub type AssetAmounts = BTreeMap<String, DecimalValue>;

// ============================================================================
// Market Data Types
// ============================================================================

/// 24h ticker for one pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTicker")]
pub struct Ticker {
    pub high: DecimalValue,
    pub low: DecimalValue,
    /// Last traded price
    pub last: DecimalValue,
    /// Best bid
    pub buy: DecimalValue,
    /// Best ask
    pub sell: DecimalValue,
    /// Server time in seconds, when sent
    pub server_time: Option<i64>,
    /// Display name, sent in market summaries
    pub name: Option<String>,
    /// 24h volume per asset (`vol_<asset>`)
    pub volumes: AssetAmounts,
}

impl Ticker {
    /// 24h volume of one asset
    pub fn volume(&self, asset: &str) -> Option<DecimalValue> {
        self.volumes.get(asset).cloned()
    }

    /// Ask minus bid
    pub fn spread(&self) -> DecimalValue {
        &self.sell - &self.buy
    }
}

#[derive(Deserialize)]
struct RawTicker {
    high: DecimalValue,
    low: DecimalValue,
    last: DecimalValue,
    buy: DecimalValue,
    sell: DecimalValue,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    server_time: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl TryFrom<RawTicker> for Ticker {
    type Error = MalformedNumber;

    fn try_from(raw: RawTicker) -> Result<Self, Self::Error> {
        Ok(Self {
            high: raw.high,
            low: raw.low,
            last: raw.last,
            buy: raw.buy,
            sell: raw.sell,
            server_time: raw.server_time,
            name: raw.name,
            volumes: prefixed(&raw.extra, "vol_")?,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct TickerPayload {
    pub ticker: Ticker,
}

/// Public trade on a market
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PublicTrade {
    /// Trade time in seconds
    #[serde(deserialize_with = "lenient::i64")]
    pub date: i64,
    pub price: DecimalValue,
    pub amount: DecimalValue,
    /// Trade id
    #[serde(deserialize_with = "lenient::string")]
    pub tid: String,
    /// Taker side
    #[serde(rename = "type")]
    pub trade_type: TradeType,
}

/// One price level of the order book
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(DecimalValue, DecimalValue)")]
pub struct BookLevel {
    pub price: DecimalValue,
    pub amount: DecimalValue,
}

impl From<(DecimalValue, DecimalValue)> for BookLevel {
    fn from((price, amount): (DecimalValue, DecimalValue)) -> Self {
        Self { price, amount }
    }
}

/// Open orders on a market, as `[price, amount]` levels
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderBook {
    /// Bids, best first
    #[serde(default)]
    pub buy: Vec<BookLevel>,
    /// Asks, best first
    #[serde(default)]
    pub sell: Vec<BookLevel>,
}

impl OrderBook {
    /// Best bid level
    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.buy.first()
    }

    /// Best ask level
    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.sell.first()
    }

    /// Best ask minus best bid
    pub fn spread(&self) -> Option<DecimalValue> {
        Some(&self.best_ask()?.price - &self.best_bid()?.price)
    }
}

/// Tickers and reference prices for every market
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketSummaries {
    /// Ticker per pair id
    pub tickers: BTreeMap<String, Ticker>,
    /// Price 24 hours ago, keyed by pair id without separator (`tenbtc`)
    #[serde(default)]
    pub prices_24h: AssetAmounts,
    /// Price 7 days ago, keyed like `prices_24h`
    #[serde(default)]
    pub prices_7d: AssetAmounts,
}

/// Static description of one market
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketInfo {
    /// Pair id as used by the other endpoints (e.g. `ten_btc`)
    pub ticker_id: String,
    /// Quote ticker
    pub base_currency: String,
    /// Base ticker
    pub traded_currency: String,
    #[serde(default)]
    pub traded_currency_unit: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_currency_price: Option<DecimalValue>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub volume_precision: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub price_precision: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub price_round: Option<i64>,
    #[serde(default)]
    pub trade_min_base_currency: Option<DecimalValue>,
    #[serde(default)]
    pub trade_min_traded_currency: Option<DecimalValue>,
    #[serde(default)]
    pub trade_fee_percent: Option<DecimalValue>,
    #[serde(default)]
    pub has_memo: Option<bool>,
    #[serde(default)]
    pub url_logo: Option<String>,
}

impl MarketInfo {
    /// Build the registry entry for this market
    pub fn trading_pair(&self) -> TradingPair {
        TradingPair::new(&self.ticker_id, &self.traded_currency, &self.base_currency)
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Account details and balances
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserInfo {
    /// Server time in seconds
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub server_time: Option<i64>,
    /// Available and frozen balances
    #[serde(rename = "balance")]
    pub assets: UserAssets,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
}

/// An order, open or historical
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    pub order_id: i64,
    /// Pair id, when the endpoint includes it
    pub pair: Option<String>,
    pub trade_type: TradeType,
    pub order_type: Option<OrderType>,
    pub price: DecimalValue,
    /// Submission time in seconds
    pub submit_time: Option<i64>,
    /// Completion time in seconds
    pub finish_time: Option<i64>,
    pub status: Option<OrderStatus>,
    /// Ordered amount per asset (`order_<asset>`)
    pub ordered: AssetAmounts,
    /// Unfilled amount per asset (`remain_<asset>`)
    pub remaining: AssetAmounts,
}

#[derive(Deserialize)]
struct RawOrder {
    #[serde(deserialize_with = "lenient::i64")]
    order_id: i64,
    #[serde(default)]
    pair: Option<String>,
    #[serde(rename = "type")]
    trade_type: TradeType,
    #[serde(default)]
    order_type: Option<OrderType>,
    price: DecimalValue,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    submit_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    finish_time: Option<i64>,
    #[serde(default)]
    status: Option<OrderStatus>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl TryFrom<RawOrder> for Order {
    type Error = MalformedNumber;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: raw.order_id,
            pair: raw.pair,
            trade_type: raw.trade_type,
            order_type: raw.order_type,
            price: raw.price,
            submit_time: raw.submit_time,
            finish_time: raw.finish_time,
            status: raw.status,
            ordered: prefixed(&raw.extra, "order_")?,
            remaining: prefixed(&raw.extra, "remain_")?,
        })
    }
}

#[derive(Deserialize)]
pub(crate) struct OrderPayload {
    pub order: Order,
}

/// Open orders grouped by pair id
pub type OpenOrders = BTreeMap<String, Vec<Order>>;

/// `orders` is a map by pair when listing every market and a plain list
/// when one pair was requested
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum OpenOrdersRepr {
    ByPair(BTreeMap<String, Vec<Order>>),
    Single(Vec<Order>),
}

#[derive(Deserialize)]
pub(crate) struct OpenOrdersPayload {
    #[serde(default)]
    pub orders: Option<OpenOrdersRepr>,
}

impl OpenOrdersPayload {
    /// Group the orders, keying a plain list by `pair`
    pub(crate) fn into_open_orders(self, pair: &str) -> OpenOrders {
        match self.orders {
            Some(OpenOrdersRepr::ByPair(map)) => map,
            Some(OpenOrdersRepr::Single(list)) if list.is_empty() => OpenOrders::new(),
            Some(OpenOrdersRepr::Single(list)) => OpenOrders::from([(pair.to_string(), list)]),
            None => OpenOrders::new(),
        }
    }
}

/// Closed and open orders of one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderHistory {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// One fill of the user's order
///
/// The filled amounts arrive keyed by bare asset ticker next to the other
/// fields, so they stay in `extra` until [`TradeHistory::collect_amounts`]
/// picks them out for a known pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawUserTrade")]
pub struct UserTrade {
    pub trade_id: i64,
    pub order_id: i64,
    pub pair: Option<String>,
    pub trade_type: TradeType,
    pub price: DecimalValue,
    pub fee: Option<DecimalValue>,
    /// Trade time in seconds
    pub trade_time: Option<i64>,
    /// Filled amount keyed by asset ticker
    pub amounts: AssetAmounts,
    /// Fields not listed above, as sent
    pub extra: BTreeMap<String, Value>,
}

impl UserTrade {
    /// Move the base and quote amounts of `pair` from `extra` into `amounts`
    pub fn collect_amounts(&mut self, pair: &TradingPair) -> Result<(), MalformedNumber> {
        for asset in [pair.base(), pair.quote()] {
            if let Some(value) = self.extra.remove(asset) {
                let amount = DecimalValue::try_from(&value)?;
                self.amounts.insert(asset.to_string(), amount);
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawUserTrade {
    #[serde(deserialize_with = "lenient::i64")]
    trade_id: i64,
    #[serde(deserialize_with = "lenient::i64")]
    order_id: i64,
    #[serde(default)]
    pair: Option<String>,
    #[serde(rename = "type")]
    trade_type: TradeType,
    price: DecimalValue,
    #[serde(default)]
    fee: Option<DecimalValue>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    trade_time: Option<i64>,
    #[serde(default, rename = "trade_time_print")]
    _trade_time_print: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl From<RawUserTrade> for UserTrade {
    fn from(raw: RawUserTrade) -> Self {
        Self {
            trade_id: raw.trade_id,
            order_id: raw.order_id,
            pair: raw.pair,
            trade_type: raw.trade_type,
            price: raw.price,
            fee: raw.fee,
            trade_time: raw.trade_time,
            amounts: AssetAmounts::new(),
            extra: raw.extra,
        }
    }
}

/// Fills of one pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TradeHistory {
    #[serde(default)]
    pub trades: Vec<UserTrade>,
}

impl TradeHistory {
    /// Resolve the filled amounts of every trade against `pair`
    pub fn collect_amounts(mut self, pair: &TradingPair) -> Result<Self, MalformedNumber> {
        for trade in &mut self.trades {
            trade.collect_amounts(pair)?;
        }
        Ok(self)
    }
}

/// Deposit or withdrawal
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub status: Option<String>,
    /// Transfer network or kind, as labelled by the exchange
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub amount: DecimalValue,
    #[serde(default)]
    pub fee: Option<DecimalValue>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub submit_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub success_time: Option<i64>,
    /// Deposit or withdrawal id
    #[serde(
        default,
        alias = "deposit_id",
        alias = "withdraw_id",
        deserialize_with = "lenient::opt_string"
    )]
    pub id: Option<String>,
    /// On-chain transaction hash
    #[serde(default, alias = "txid")]
    pub tx: Option<String>,
}

/// Deposits and withdrawals per asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionHistory {
    #[serde(default, rename = "deposit", deserialize_with = "lenient::asset_map")]
    pub deposits: BTreeMap<String, Vec<Transaction>>,
    #[serde(default, rename = "withdraw", deserialize_with = "lenient::asset_map")]
    pub withdrawals: BTreeMap<String, Vec<Transaction>>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order placement parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRequest {
    pub pair: String,
    pub trade_type: TradeType,
    pub order_type: OrderType,
    /// Base amount, except for market buys where it is the quote amount to spend
    pub amount: DecimalValue,
    /// Limit price; ignored for market orders
    pub price: Option<DecimalValue>,
}

impl TradeRequest {
    /// Limit order
    pub fn limit(
        pair: impl Into<String>,
        trade_type: TradeType,
        amount: DecimalValue,
        price: DecimalValue,
    ) -> Self {
        Self {
            pair: pair.into(),
            trade_type,
            order_type: OrderType::Limit,
            amount,
            price: Some(price),
        }
    }

    /// Market order
    pub fn market(pair: impl Into<String>, trade_type: TradeType, amount: DecimalValue) -> Self {
        Self {
            pair: pair.into(),
            trade_type,
            order_type: OrderType::Market,
            amount,
            price: None,
        }
    }

    /// Ticker the amount is denominated in
    pub fn amount_asset<'p>(&self, pair: &'p TradingPair) -> &'p str {
        match (self.order_type, self.trade_type) {
            (OrderType::Market, TradeType::Buy) => pair.quote(),
            _ => pair.base(),
        }
    }

    /// Check amounts and build the form fields (without `pair`)
    pub fn to_params(&self, pair: &TradingPair) -> RestResult<Params> {
        if !self.amount.is_positive() {
            return Err(RestError::InvalidParameter(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }

        let mut params = Params::new();
        params.insert("type".to_string(), self.trade_type.to_string());
        params.insert("order_type".to_string(), self.order_type.to_string());
        params.insert(self.amount_asset(pair).to_string(), self.amount.to_string());

        if self.order_type == OrderType::Limit {
            let price = self
                .price
                .as_ref()
                .filter(|price| price.is_positive())
                .ok_or_else(|| {
                    RestError::InvalidParameter("limit order needs a positive price".to_string())
                })?;
            params.insert("price".to_string(), price.to_string());
        }

        Ok(params)
    }
}

/// Result of placing an order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTradeResult")]
pub struct TradeResult {
    pub order_id: i64,
    pub fee: Option<DecimalValue>,
    /// Amount received by immediate fills (`receive_<asset>`)
    pub received: AssetAmounts,
    /// Amount spent by immediate fills (`spend_<asset>`)
    pub spent: AssetAmounts,
    /// Amount sold by immediate fills (`sold_<asset>`)
    pub sold: AssetAmounts,
    /// Amount left on the book (`remain_<asset>`)
    pub remaining: AssetAmounts,
    /// Balances after the order, when sent
    pub balance: Option<UserAssets>,
}

#[derive(Deserialize)]
struct RawTradeResult {
    #[serde(deserialize_with = "lenient::i64")]
    order_id: i64,
    #[serde(default)]
    fee: Option<DecimalValue>,
    #[serde(default)]
    balance: Option<UserAssets>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl TryFrom<RawTradeResult> for TradeResult {
    type Error = MalformedNumber;

    fn try_from(raw: RawTradeResult) -> Result<Self, Self::Error> {
        Ok(Self {
            order_id: raw.order_id,
            fee: raw.fee,
            received: prefixed(&raw.extra, "receive_")?,
            spent: prefixed(&raw.extra, "spend_")?,
            sold: prefixed(&raw.extra, "sold_")?,
            remaining: prefixed(&raw.extra, "remain_")?,
            balance: raw.balance,
        })
    }
}

/// Result of cancelling an order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CancelResult {
    #[serde(deserialize_with = "lenient::i64")]
    pub order_id: i64,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(default)]
    pub pair: Option<String>,
    /// Balances after the cancellation, when sent
    #[serde(default)]
    pub balance: Option<UserAssets>,
}

/// Trade history filter
///
/// Every field is optional; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeHistoryQuery {
    /// Maximum number of trades
    pub count: Option<u32>,
    /// First trade id
    pub from_id: Option<i64>,
    /// Last trade id
    pub end_id: Option<i64>,
    pub order: Option<SortOrder>,
    pub since: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TradeHistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_id_range(mut self, from_id: i64, end_id: i64) -> Self {
        self.from_id = Some(from_id);
        self.end_id = Some(end_id);
        self
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_time_range(mut self, since: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self.end = Some(end);
        self
    }

    /// Form fields (without `pair`); times are sent as Unix seconds
    pub fn to_params(&self) -> Params {
        let mut params = Params::new();
        if let Some(count) = self.count {
            params.insert("count".to_string(), count.to_string());
        }
        if let Some(from_id) = self.from_id {
            params.insert("from_id".to_string(), from_id.to_string());
        }
        if let Some(end_id) = self.end_id {
            params.insert("end_id".to_string(), end_id.to_string());
        }
        if let Some(order) = self.order {
            params.insert("order".to_string(), order.to_string());
        }
        if let Some(since) = self.since {
            params.insert("since".to_string(), since.timestamp().to_string());
        }
        if let Some(end) = self.end {
            params.insert("end".to_string(), end.timestamp().to_string());
        }
        params
    }
}

// ============================================================================
// Funding Types
// ============================================================================

/// Withdrawal parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Asset ticker (e.g. `btc`)
    pub currency: String,
    pub address: String,
    pub amount: DecimalValue,
    /// Destination tag or memo, for assets that need one
    pub memo: Option<String>,
    /// Caller-chosen id that makes the withdrawal idempotent
    pub request_id: String,
}

impl WithdrawRequest {
    pub fn new(
        currency: impl Into<String>,
        address: impl Into<String>,
        amount: DecimalValue,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            address: address.into(),
            amount,
            memo: None,
            request_id: request_id.into(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Check fields and build the form fields
    pub fn to_params(&self) -> RestResult<Params> {
        for (name, value) in [
            ("currency", &self.currency),
            ("address", &self.address),
            ("request_id", &self.request_id),
        ] {
            if value.is_empty() {
                return Err(RestError::InvalidParameter(format!("{} must not be empty", name)));
            }
        }
        if !self.amount.is_positive() {
            return Err(RestError::InvalidParameter(format!(
                "withdraw amount must be positive, got {}",
                self.amount
            )));
        }

        let mut params = Params::new();
        params.insert("currency".to_string(), self.currency.clone());
        params.insert("withdraw_address".to_string(), self.address.clone());
        params.insert("withdraw_amount".to_string(), self.amount.to_string());
        params.insert("request_id".to_string(), self.request_id.clone());
        if let Some(memo) = self.memo.as_ref().filter(|m| !m.is_empty()) {
            params.insert("withdraw_memo".to_string(), memo.clone());
        }
        Ok(params)
    }
}

/// Result of a withdrawal request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WithdrawResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub withdraw_currency: Option<String>,
    #[serde(default)]
    pub withdraw_address: Option<String>,
    #[serde(default)]
    pub withdraw_amount: Option<DecimalValue>,
    #[serde(default)]
    pub fee: Option<DecimalValue>,
    #[serde(default)]
    pub amount_after_fee: Option<DecimalValue>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub submit_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub withdraw_id: Option<String>,
    #[serde(default)]
    pub txid: Option<String>,
}

// ============================================================================
// Field helpers
// ============================================================================

/// Collect `<prefix><asset>` fields into a map keyed by `<asset>`
fn prefixed(extra: &BTreeMap<String, Value>, prefix: &str) -> Result<AssetAmounts, MalformedNumber> {
    extra
        .iter()
        .filter_map(|(key, value)| key.strip_prefix(prefix).map(|asset| (asset, value)))
        .map(|(asset, value)| DecimalValue::try_from(value).map(|d| (asset.to_string(), d)))
        .collect()
}

/// Deserializers for fields the exchange sends as either strings or numbers
mod lenient {
    use serde::de::{self, IgnoredAny};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    fn int_of<E: de::Error>(value: &Value) -> Result<i64, E> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| E::custom(format!("expected an integer, got {}", n))),
            Value::String(s) => s.trim().parse().map_err(E::custom),
            other => Err(E::custom(format!("expected an integer, got {}", other))),
        }
    }

    /// Numbers keep their JSON text
    fn text_of<E: de::Error>(value: Value) -> Result<String, E> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(E::custom(format!("expected a string or a number, got {}", other))),
        }
    }

    pub fn i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        int_of(&Value::deserialize(deserializer)?)
    }

    /// Missing, null and empty string all mean "not set"
    pub fn opt_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            value => int_of(&value).map(Some),
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        text_of(Value::deserialize(deserializer)?)
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => text_of(value).map(Some),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList<V> {
        Map(BTreeMap<String, V>),
        List(Vec<IgnoredAny>),
    }

    /// Per-asset map; an empty JSON list stands for an empty map
    pub fn asset_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<String, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        match Option::<MapOrList<V>>::deserialize(deserializer)? {
            None => Ok(BTreeMap::new()),
            Some(MapOrList::Map(map)) => Ok(map),
            Some(MapOrList::List(list)) if list.is_empty() => Ok(BTreeMap::new()),
            Some(MapOrList::List(_)) => Err(de::Error::custom("expected a map keyed by asset")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use tokenomy_types::PairRegistry;

    fn d(v: rust_decimal::Decimal) -> DecimalValue {
        DecimalValue::from(v)
    }

    #[test]
    fn test_ticker_volumes() {
        let json = r#"{
            "ticker": {
                "high": "0.00006", "low": "0.00004",
                "vol_ten": "120000.5", "vol_btc": 6.25,
                "last": "0.00005", "buy": "0.000049", "sell": "0.000051",
                "server_time": 1578304294
            }
        }"#;
        let ticker = serde_json::from_str::<TickerPayload>(json).unwrap().ticker;

        assert_eq!(ticker.last, d(dec!(0.00005)));
        assert_eq!(ticker.volume("ten"), Some(d(dec!(120000.5))));
        assert_eq!(ticker.volume("btc"), Some(d(dec!(6.25))));
        assert_eq!(ticker.volumes.len(), 2);
        assert_eq!(ticker.server_time, Some(1_578_304_294));
        assert_eq!(ticker.spread(), d(dec!(0.000002)));
    }

    #[test]
    fn test_ticker_bad_volume_fails() {
        let json = r#"{"high":"1","low":"1","last":"1","buy":"1","sell":"1","vol_btc":"much"}"#;
        assert!(serde_json::from_str::<Ticker>(json).is_err());
    }

    #[test]
    fn test_order_book_levels() {
        let json = r#"{"buy":[["0.000049","1000"],[0.000048,"250.5"]],"sell":[["0.000051","10"]]}"#;
        let book: OrderBook = serde_json::from_str(json).unwrap();

        assert_eq!(book.buy.len(), 2);
        assert_eq!(book.buy[1].price, d(dec!(0.000048)));
        assert_eq!(book.best_ask().unwrap().amount, d(dec!(10)));
        assert_eq!(book.spread(), Some(d(dec!(0.000002))));
        assert_eq!(OrderBook::default().spread(), None);
    }

    #[test]
    fn test_public_trade_accepts_string_ids() {
        let json = r#"[{"date":"1578304294","price":"0.00005","amount":"12","tid":"991","type":"sell"}]"#;
        let trades: Vec<PublicTrade> = serde_json::from_str(json).unwrap();
        assert_eq!(trades[0].date, 1_578_304_294);
        assert_eq!(trades[0].tid, "991");
        assert_eq!(trades[0].trade_type, TradeType::Sell);
    }

    #[test]
    fn test_order_asset_fields() {
        let json = r#"{
            "order_id": "11", "type": "buy", "price": "0.00005",
            "order_ten": "100", "remain_ten": "40",
            "submit_time": "1578304294", "finish_time": "", "status": "open"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.order_id, 11);
        assert_eq!(order.ordered["ten"], d(dec!(100)));
        assert_eq!(order.remaining["ten"], d(dec!(40)));
        assert_eq!(order.finish_time, None);
        assert_eq!(order.status, Some(OrderStatus::Open));
    }

    #[test]
    fn test_open_orders_shapes() {
        let by_pair: OpenOrdersPayload = serde_json::from_str(
            r#"{"orders":{"ten_btc":[{"order_id":1,"type":"sell","price":"1","order_ten":"5"}]}}"#,
        )
        .unwrap();
        let grouped = by_pair.into_open_orders("ignored");
        assert_eq!(grouped["ten_btc"].len(), 1);

        let single: OpenOrdersPayload = serde_json::from_str(
            r#"{"orders":[{"order_id":2,"type":"buy","price":"1","order_ten":"5"}]}"#,
        )
        .unwrap();
        let grouped = single.into_open_orders("ten_btc");
        assert_eq!(grouped["ten_btc"][0].order_id, 2);

        let empty: OpenOrdersPayload = serde_json::from_str(r#"{"orders":[]}"#).unwrap();
        assert!(empty.into_open_orders("ten_btc").is_empty());
    }

    #[test]
    fn test_user_trade_amounts() {
        let json = r#"{"trades":[{
            "trade_id": "5", "order_id": "11", "type": "sell", "ten": "60", "btc": 0.003,
            "price": "0.00005", "fee": "0.0000003", "trade_time": "1578304294",
            "trade_time_print": "2020-01-06 09:51:34",
            "client_order_id": "my-order-7", "is_maker": true
        }]}"#;
        let registry = PairRegistry::supported();
        let history: TradeHistory = serde_json::from_str(json).unwrap();
        assert!(history.trades[0].amounts.is_empty());

        let history = history.collect_amounts(registry.get("ten_btc").unwrap()).unwrap();
        let trade = &history.trades[0];

        assert_eq!(trade.trade_id, 5);
        assert_eq!(trade.amounts.len(), 2);
        assert_eq!(trade.amounts["ten"], d(dec!(60)));
        assert_eq!(trade.amounts["btc"], d(dec!(0.003)));
        assert_eq!(trade.fee, Some(d(dec!(0.0000003))));
        assert_eq!(trade.extra["client_order_id"], "my-order-7");
        assert_eq!(trade.extra["is_maker"], true);
        assert!(!trade.extra.contains_key("ten"));
    }

    #[test]
    fn test_user_trade_bad_amount_fails() {
        let json = r#"{"trades":[{"trade_id":1,"order_id":2,"type":"buy","price":"1","ten":"sixty"}]}"#;
        let registry = PairRegistry::supported();
        let history: TradeHistory = serde_json::from_str(json).unwrap();

        let err = history
            .collect_amounts(registry.get("ten_btc").unwrap())
            .unwrap_err();
        assert_eq!(err.literal(), "sixty");
    }

    #[test]
    fn test_asset_fields_keep_number_digits() {
        let json = r#"{"high":"1","low":"1","last":0.12345678901234567890123,"buy":"1","sell":"1",
            "vol_btc":123456789012345678901.000000001}"#;
        let ticker: Ticker = serde_json::from_str(json).unwrap();

        assert_eq!(
            ticker.last,
            DecimalValue::parse("0.12345678901234567890123").unwrap()
        );
        assert_eq!(
            ticker.volume("btc").unwrap().to_string(),
            "123456789012345678901.000000001"
        );
    }

    #[test]
    fn test_lenient_ids_and_times() {
        let json = r#"[{"date":1578304294,"price":"1","amount":"1","tid":18446744073709551615,"type":"buy"}]"#;
        let trades: Vec<PublicTrade> = serde_json::from_str(json).unwrap();
        assert_eq!(trades[0].tid, "18446744073709551615");

        let fractional = r#"[{"date":1578304294.5,"price":"1","amount":"1","tid":"1","type":"buy"}]"#;
        assert!(serde_json::from_str::<Vec<PublicTrade>>(fractional).is_err());

        let null_time = r#"{"order_id":1,"type":"buy","price":"1","submit_time":null}"#;
        assert_eq!(serde_json::from_str::<Order>(null_time).unwrap().submit_time, None);
    }

    #[test]
    fn test_transaction_history() {
        let json = r#"{
            "deposit": {"btc": [{"status":"success","type":"deposit","amount":"0.5",
                "fee":"0","submit_time":"1578304294","success_time":"1578304300",
                "deposit_id":"77","tx":"abc"}]},
            "withdraw": []
        }"#;
        let history: TransactionHistory = serde_json::from_str(json).unwrap();

        let deposit = &history.deposits["btc"][0];
        assert_eq!(deposit.amount, d(dec!(0.5)));
        assert_eq!(deposit.id.as_deref(), Some("77"));
        assert!(history.withdrawals.is_empty());
    }

    #[test]
    fn test_trade_result_fields() {
        let json = r#"{"order_id":42,"receive_ten":"0","spend_btc":"0","remain_btc":"0.005",
            "fee":"0","balance":{"btc":"1","frozen_btc":"0.005"}}"#;
        let result: TradeResult = serde_json::from_str(json).unwrap();

        assert_eq!(result.order_id, 42);
        assert_eq!(result.remaining["btc"], d(dec!(0.005)));
        assert!(result.received["ten"].is_zero());
        assert_eq!(result.balance.unwrap().frozen("btc"), d(dec!(0.005)));
    }

    #[test]
    fn test_trade_request_params() {
        let registry = PairRegistry::supported();
        let pair = registry.get("ten_btc").unwrap();

        let limit = TradeRequest::limit("ten_btc", TradeType::Buy, d(dec!(100)), d(dec!(0.00005)));
        let params = limit.to_params(pair).unwrap();
        assert_eq!(params["type"], "buy");
        assert_eq!(params["order_type"], "limit");
        assert_eq!(params["ten"], "100");
        assert_eq!(params["price"], "0.00005");

        let market_buy = TradeRequest::market("ten_btc", TradeType::Buy, d(dec!(0.01)));
        let params = market_buy.to_params(pair).unwrap();
        assert_eq!(params["btc"], "0.01");
        assert!(!params.contains_key("price"));

        let market_sell = TradeRequest::market("ten_btc", TradeType::Sell, d(dec!(50)));
        assert_eq!(market_sell.to_params(pair).unwrap()["ten"], "50");
    }

    #[test]
    fn test_trade_request_rejects_non_positive() {
        let registry = PairRegistry::supported();
        let pair = registry.get("ten_btc").unwrap();

        let zero = TradeRequest::market("ten_btc", TradeType::Sell, DecimalValue::zero());
        assert!(matches!(zero.to_params(pair), Err(RestError::InvalidParameter(_))));

        let mut no_price = TradeRequest::limit("ten_btc", TradeType::Sell, d(dec!(1)), d(dec!(1)));
        no_price.price = None;
        assert!(matches!(no_price.to_params(pair), Err(RestError::InvalidParameter(_))));

        let negative = TradeRequest::limit("ten_btc", TradeType::Sell, d(dec!(1)), d(dec!(-1)));
        assert!(matches!(negative.to_params(pair), Err(RestError::InvalidParameter(_))));
    }

    #[test]
    fn test_trade_history_query_params() {
        let since = Utc.timestamp_opt(1_578_000_000, 0).unwrap();
        let end = Utc.timestamp_opt(1_578_300_000, 0).unwrap();
        let params = TradeHistoryQuery::new()
            .with_count(1)
            .with_order(SortOrder::Asc)
            .with_time_range(since, end)
            .to_params();

        assert_eq!(params["count"], "1");
        assert_eq!(params["order"], "asc");
        assert_eq!(params["since"], "1578000000");
        assert_eq!(params["end"], "1578300000");
        assert!(!params.contains_key("from_id"));
        assert!(TradeHistoryQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_withdraw_request_params() {
        let request = WithdrawRequest::new("xlm", "GABC", d(dec!(25)), "req-1").with_memo("12345");
        let params = request.to_params().unwrap();
        assert_eq!(params["withdraw_address"], "GABC");
        assert_eq!(params["withdraw_amount"], "25");
        assert_eq!(params["withdraw_memo"], "12345");

        let missing = WithdrawRequest::new("xlm", "", d(dec!(25)), "req-1");
        assert!(matches!(missing.to_params(), Err(RestError::InvalidParameter(_))));
    }

    #[test]
    fn test_market_info_pair() {
        let json = r#"[{"ticker_id":"ten_btc","base_currency":"btc","traded_currency":"ten",
            "price_precision":"8","trade_min_base_currency":"0.0001"}]"#;
        let info: Vec<MarketInfo> = serde_json::from_str(json).unwrap();
        let pair = info[0].trading_pair();

        assert_eq!(pair.base(), "ten");
        assert_eq!(pair.quote(), "btc");
        assert_eq!(info[0].price_precision, Some(8));
    }
}
