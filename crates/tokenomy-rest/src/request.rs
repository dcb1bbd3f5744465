//! Request building: operation table, pair validation, endpoint selection
//! and signing
//!
//! Nothing in this module performs I/O. A [`SignedRequest`] is built for one
//! call and consumed by the [`Transport`](crate::Transport).

use std::collections::BTreeMap;
use std::fmt;

use tokenomy_auth::{timestamp_millis, Credentials, RequestSigner};
use tokenomy_types::{PairRegistry, TradingPair};

use crate::error::{RestError, RestResult};

/// Form or query parameters, kept in canonical (sorted) order
pub type Params = BTreeMap<String, String>;

/// Path of the shared private endpoint
pub const PRIVATE_PATH: &str = "/tapi";

/// Header carrying the API token
pub const HEADER_KEY: &str = "Key";
/// Header carrying the hex signature of the body
pub const HEADER_SIGN: &str = "Sign";

/// Every operation the client can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Private
    PlaceTrade,
    CancelOrder,
    GetUserInfo,
    GetOrder,
    GetOpenOrders,
    GetOrderHistory,
    GetTradeHistory,
    GetTransactionHistory,
    Withdraw,
    // Public
    GetTicker,
    GetTrades,
    GetOrderBook,
    GetMarketSummaries,
    GetMarketInfo,
}

impl Operation {
    /// All operations, private first
    pub const ALL: [Operation; 14] = [
        Operation::PlaceTrade,
        Operation::CancelOrder,
        Operation::GetUserInfo,
        Operation::GetOrder,
        Operation::GetOpenOrders,
        Operation::GetOrderHistory,
        Operation::GetTradeHistory,
        Operation::GetTransactionHistory,
        Operation::Withdraw,
        Operation::GetTicker,
        Operation::GetTrades,
        Operation::GetOrderBook,
        Operation::GetMarketSummaries,
        Operation::GetMarketInfo,
    ];

    /// Returns true if the operation needs a signed request
    pub fn is_private(&self) -> bool {
        self.method_name().is_some()
    }

    /// Value of the `method` form field for private operations
    pub fn method_name(&self) -> Option<&'static str> {
        match self {
            Self::PlaceTrade => Some("trade"),
            Self::CancelOrder => Some("cancelOrder"),
            Self::GetUserInfo => Some("getInfo"),
            Self::GetOrder => Some("getOrder"),
            Self::GetOpenOrders => Some("openOrders"),
            Self::GetOrderHistory => Some("orderHistory"),
            Self::GetTradeHistory => Some("tradeHistory"),
            Self::GetTransactionHistory => Some("transHistory"),
            Self::Withdraw => Some("withdrawCoin"),
            Self::GetTicker
            | Self::GetTrades
            | Self::GetOrderBook
            | Self::GetMarketSummaries
            | Self::GetMarketInfo => None,
        }
    }

    /// Returns true if the operation takes a trading pair
    pub fn requires_pair(&self) -> bool {
        matches!(
            self,
            Self::PlaceTrade
                | Self::CancelOrder
                | Self::GetOrder
                | Self::GetOpenOrders
                | Self::GetOrderHistory
                | Self::GetTradeHistory
                | Self::GetTicker
                | Self::GetTrades
                | Self::GetOrderBook
        )
    }

    /// Endpoint path, with the pair interpolated where the template has one
    pub fn path(&self, pair: &str) -> String {
        match self {
            Self::GetTicker => format!("/api/{}/ticker", pair),
            Self::GetTrades => format!("/api/{}/trades", pair),
            Self::GetOrderBook => format!("/api/{}/depth", pair),
            Self::GetMarketSummaries => "/api/summaries".to_string(),
            Self::GetMarketInfo => "/api/market_info".to_string(),
            _ => PRIVATE_PATH.to_string(),
        }
    }

    /// HTTP method used on the wire
    pub fn http_method(&self) -> HttpMethod {
        if self.is_private() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self),
        }
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Authentication attached to a private request
pub struct Authorization {
    /// API token, sent in the `Key` header
    pub token: String,
    /// Hex HMAC-SHA512 of the body, sent in the `Sign` header
    pub signature: String,
    /// Milliseconds since the Unix epoch, also present in the body
    pub timestamp: i64,
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.token.chars().take(8).collect();
        f.debug_struct("Authorization")
            .field("token", &format!("{}...", shown))
            .field("signature", &self.signature)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// A request ready for the transport
///
/// Deliberately not `Clone`: a signature is valid for one send only.
#[derive(Debug)]
pub struct SignedRequest {
    pub operation: Operation,
    pub method: HttpMethod,
    /// Path relative to the server address
    pub path: String,
    /// Query parameters for GET, form fields for POST
    pub params: Params,
    /// Form-encoded body (POST only)
    pub body: Option<String>,
    /// Present on private requests
    pub auth: Option<Authorization>,
}

impl SignedRequest {
    /// Returns true if the request carries a signature
    pub fn is_signed(&self) -> bool {
        self.auth.is_some()
    }
}

/// Builds [`SignedRequest`]s from an operation and its parameters
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    registry: &'a PairRegistry,
    credentials: Option<&'a Credentials>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(registry: &'a PairRegistry, credentials: Option<&'a Credentials>) -> Self {
        Self {
            registry,
            credentials,
        }
    }

    /// Validate a pair against the registry
    pub fn validate_pair(&self, pair: Option<&str>) -> RestResult<&'a TradingPair> {
        Ok(self.registry.validate(pair.unwrap_or_default())?)
    }

    /// Build an unsigned GET request for a public operation
    pub fn public(
        &self,
        operation: Operation,
        pair: Option<&str>,
        query: Params,
    ) -> RestResult<SignedRequest> {
        if operation.is_private() {
            return Err(RestError::InvalidParameter(format!(
                "{} is a private operation",
                operation
            )));
        }

        let path = if operation.requires_pair() {
            operation.path(self.validate_pair(pair)?.id())
        } else {
            operation.path("")
        };

        Ok(SignedRequest {
            operation,
            method: HttpMethod::Get,
            path,
            params: query,
            body: None,
            auth: None,
        })
    }

    /// Build a signed POST request for a private operation
    pub fn private(
        &self,
        operation: Operation,
        pair: Option<&str>,
        params: Params,
    ) -> RestResult<SignedRequest> {
        self.private_at(operation, pair, params, timestamp_millis())
    }

    /// Same as [`private`](Self::private) with a fixed timestamp
    pub fn private_at(
        &self,
        operation: Operation,
        pair: Option<&str>,
        mut params: Params,
        timestamp: i64,
    ) -> RestResult<SignedRequest> {
        let method = operation.method_name().ok_or_else(|| {
            RestError::InvalidParameter(format!("{} is a public operation", operation))
        })?;

        if operation.requires_pair() {
            let pair = self.validate_pair(pair)?;
            params.insert("pair".to_string(), pair.id().to_string());
        }

        let credentials = self.credentials.ok_or(RestError::Unauthenticated)?;
        let signer = RequestSigner::at(credentials, timestamp);
        let signed = signer.sign(method, params)?;

        Ok(SignedRequest {
            operation,
            method: HttpMethod::Post,
            path: PRIVATE_PATH.to_string(),
            params: signed.params,
            body: Some(signed.body),
            auth: Some(Authorization {
                token: signer.token().to_string(),
                signature: signed.signature,
                timestamp: signed.timestamp,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenomy_auth::sign;
    use tokenomy_types::pairs;

    fn creds() -> Credentials {
        Credentials::new("token-abcdefghij", "secret").unwrap()
    }

    #[test]
    fn test_operation_table() {
        let private: Vec<_> = Operation::ALL.iter().filter(|op| op.is_private()).collect();
        assert_eq!(private.len(), 9);

        assert_eq!(Operation::PlaceTrade.method_name(), Some("trade"));
        assert_eq!(Operation::GetTransactionHistory.method_name(), Some("transHistory"));
        assert_eq!(Operation::Withdraw.method_name(), Some("withdrawCoin"));
        assert_eq!(Operation::GetTicker.method_name(), None);

        assert_eq!(Operation::GetUserInfo.http_method(), HttpMethod::Post);
        assert_eq!(Operation::GetMarketInfo.http_method(), HttpMethod::Get);
        assert_eq!(Operation::CancelOrder.to_string(), "cancelOrder");
    }

    #[test]
    fn test_public_path_interpolates_pair() {
        let registry = PairRegistry::supported();
        let builder = RequestBuilder::new(&registry, None);

        let req = builder
            .public(Operation::GetTicker, Some(pairs::TEN_BTC), Params::new())
            .unwrap();
        assert_eq!(req.path, "/api/ten_btc/ticker");
        assert_eq!(req.method, HttpMethod::Get);
        assert!(!req.is_signed());

        let req = builder
            .public(Operation::GetOrderBook, Some(pairs::BTC_IDK), Params::new())
            .unwrap();
        assert_eq!(req.path, "/api/btc_idk/depth");

        let req = builder
            .public(Operation::GetMarketSummaries, None, Params::new())
            .unwrap();
        assert_eq!(req.path, "/api/summaries");
    }

    #[test]
    fn test_public_rejects_bad_pair() {
        let registry = PairRegistry::supported();
        let builder = RequestBuilder::new(&registry, None);

        for pair in [None, Some(""), Some("doge_btc"), Some("TEN_BTC")] {
            let err = builder
                .public(Operation::GetTrades, pair, Params::new())
                .unwrap_err();
            assert!(matches!(err, RestError::InvalidPairName(_)), "{pair:?}");
        }
    }

    #[test]
    fn test_private_requires_credentials() {
        let registry = PairRegistry::supported();
        let builder = RequestBuilder::new(&registry, None);

        let err = builder
            .private(Operation::GetUserInfo, None, Params::new())
            .unwrap_err();
        assert!(matches!(err, RestError::Unauthenticated));
    }

    #[test]
    fn test_pair_checked_before_credentials() {
        let registry = PairRegistry::supported();
        let builder = RequestBuilder::new(&registry, None);

        let err = builder
            .private(Operation::GetOpenOrders, Some("nope"), Params::new())
            .unwrap_err();
        assert!(matches!(err, RestError::InvalidPairName(p) if p == "nope"));
    }

    #[test]
    fn test_private_request_is_signed() {
        let registry = PairRegistry::supported();
        let creds = creds();
        let builder = RequestBuilder::new(&registry, Some(&creds));

        let req = builder
            .private_at(
                Operation::GetOpenOrders,
                Some(pairs::TEN_BTC),
                Params::new(),
                1_578_304_294_000,
            )
            .unwrap();

        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, PRIVATE_PATH);
        assert_eq!(
            req.body.as_deref(),
            Some("method=openOrders&pair=ten_btc&timestamp=1578304294000")
        );

        let auth = req.auth.as_ref().unwrap();
        assert_eq!(auth.token, "token-abcdefghij");
        assert_eq!(auth.timestamp, 1_578_304_294_000);
        assert_eq!(auth.signature, sign(&req.params, "secret").unwrap());

        let debug = format!("{:?}", auth);
        assert!(!debug.contains("token-abcdefghij"));
    }

    #[test]
    fn test_operation_kind_mismatch() {
        let registry = PairRegistry::supported();
        let creds = creds();
        let builder = RequestBuilder::new(&registry, Some(&creds));

        assert!(matches!(
            builder.public(Operation::GetUserInfo, None, Params::new()),
            Err(RestError::InvalidParameter(_))
        ));
        assert!(matches!(
            builder.private(Operation::GetMarketInfo, None, Params::new()),
            Err(RestError::InvalidParameter(_))
        ));
    }
}
