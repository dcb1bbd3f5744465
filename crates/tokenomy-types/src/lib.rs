//! Shared types for the Tokenomy REST API
//!
//! This crate holds the value types every other crate in the workspace
//! builds on. It performs no I/O.
//!
//! # Key Types
//!
//! - [`DecimalValue`] - Exact decimal for prices, amounts and balances
//! - [`TradingPair`], [`PairRegistry`] - Supported markets and pair validation
//! - [`UserAssets`] - Available and frozen balances per asset
//! - [`TradeType`], [`OrderType`], [`SortOrder`], [`OrderStatus`] - Wire enums
//! - [`MalformedNumber`], [`InvalidPairName`] - Error types

pub mod assets;
pub mod decimal;
pub mod enums;
pub mod error;
pub mod pair;

// Re-export commonly used types
pub use assets::*;
pub use decimal::*;
pub use enums::*;
pub use error::*;
pub use pair::{pairs, PairRegistry, TradingPair};

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
