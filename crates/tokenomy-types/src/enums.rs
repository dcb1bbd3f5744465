//! Trade type, order type, sort order and order status enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of a trade or order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Buy (bid)
    #[serde(alias = "bid")]
    Buy,
    /// Sell (ask)
    #[serde(alias = "ask")]
    Sell,
}

impl TradeType {
    /// Returns the value used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an order is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Rest on the book at a fixed price
    #[default]
    Limit,
    /// Fill immediately against the book
    Market,
}

impl OrderType {
    /// Returns the value used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Market => "market",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the value used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OrderStatus {
    /// Waiting on the book
    Open,
    /// Completely filled
    Filled,
    /// Cancelled by the user or the exchange
    #[serde(alias = "canceled")]
    Cancelled,
    /// Status this client does not know about
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Returns true if the order can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_type_wire_values() {
        assert_eq!(TradeType::Buy.to_string(), "buy");
        assert_eq!(TradeType::Sell.opposite(), TradeType::Buy);

        let bid: TradeType = serde_json::from_str(r#""bid""#).unwrap();
        let sell: TradeType = serde_json::from_str(r#""sell""#).unwrap();
        assert_eq!(bid, TradeType::Buy);
        assert_eq!(sell, TradeType::Sell);
    }

    #[test]
    fn test_order_status_unknown() {
        let status: OrderStatus = serde_json::from_str(r#""partially_filled""#).unwrap();
        assert_eq!(status, OrderStatus::Unknown);

        let status: OrderStatus = serde_json::from_str(r#""canceled""#).unwrap();
        assert!(status.is_final());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(OrderType::default(), OrderType::Limit);
        assert_eq!(SortOrder::default().as_str(), "desc");
    }
}
