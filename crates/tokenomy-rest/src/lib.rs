//! REST API client for the Tokenomy cryptocurrency exchange
//!
//! This crate is the boundary between a caller and the exchange: it validates
//! pairs, builds and signs requests, and decodes the exchange's envelopes into
//! typed values with exact decimals.
//!
//! # Features
//!
//! - **Market Data**: Ticker, public trades, order book, summaries, market info
//! - **Account**: Balances, open orders, order/trade/transaction history
//! - **Trading**: Limit and market orders, cancellation
//! - **Funding**: Withdrawals
//!
//! # Authentication
//!
//! Private endpoints take a form body signed with HMAC-SHA512 (see
//! `tokenomy-auth`). A client without token and secret fails every private
//! call with [`RestError::Unauthenticated`] before anything is sent.
//!
//! # Example
//!
//! ```no_run
//! use tokenomy_rest::{Environment, TokenomyClient};
//! use tokenomy_types::pairs;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = TokenomyClient::new(Environment::public())?;
//!     let book = client.get_order_book(pairs::TEN_BTC).await?;
//!     println!("spread: {:?}", book.spread());
//!
//!     // Private endpoints (auth required)
//!     let auth_client = TokenomyClient::new(Environment::new("my-token", "my-secret"))?;
//!     let open = auth_client.list_open_orders(pairs::TEN_BTC).await?;
//!     println!("open orders: {:?}", open);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Retries
//!
//! Nothing here retries. Exchange errors come back exactly as the exchange
//! reported them; [`RestError::is_retryable`] helps callers that want to.

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, TokenomyClient};
pub use dispatch::Dispatcher;
pub use envelope::Envelope;
pub use error::{RestError, RestResult};
pub use request::{HttpMethod, Operation, Params, RequestBuilder, SignedRequest};
pub use transport::{HttpTransport, RawResponse, Transport};

// Configuration lives in tokenomy-auth
pub use tokenomy_auth::{Credentials, DebugLevel, Environment};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    BookLevel, MarketInfo, MarketSummaries, OrderBook, PublicTrade, Ticker,
    // Account
    OpenOrders, Order, OrderHistory, TradeHistory, TradeHistoryQuery, Transaction,
    TransactionHistory, UserInfo, UserTrade,
    // Trading
    CancelResult, TradeRequest, TradeResult,
    // Funding
    WithdrawRequest, WithdrawResult,
};
