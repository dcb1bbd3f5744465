//! Common test utilities and fixtures for integration tests
//!
//! Responses follow the shapes the Tokenomy API sends; the transport is a
//! stub that records every request it is handed.

#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokenomy_rest::{
    Credentials, Environment, HttpMethod, RawResponse, RestError, RestResult, SignedRequest,
    TokenomyClient, Transport,
};

pub const TOKEN: &str = "test-token-0123456789";
pub const SECRET: &str = "test-secret";

/// Ticker for ten_btc
pub const TICKER_RESPONSE: &str = r#"{
    "ticker": {
        "high": "0.00006100",
        "low": "0.00004900",
        "vol_ten": "1520000.25",
        "vol_btc": "83.1377",
        "last": "0.00005000",
        "buy": "0.00004990",
        "sell": "0.00005010",
        "server_time": 1578304294
    }
}"#;

/// Order book for ten_btc
pub const DEPTH_RESPONSE: &str = r#"{
    "buy": [["0.00004990", "1200"], ["0.00004980", "350.5"]],
    "sell": [["0.00005010", "800"], ["0.00005020", "42"]]
}"#;

/// Market summaries with two pairs
pub const SUMMARIES_RESPONSE: &str = r#"{
    "tickers": {
        "ten_btc": {"high":"0.000061","low":"0.000049","vol_ten":"1520000","vol_btc":"83",
                    "last":"0.00005","buy":"0.0000499","sell":"0.0000501","server_time":1578304294,
                    "name":"Tokenomy"},
        "btc_usdt": {"high":"7500","low":"7300","vol_btc":"12.5","vol_usdt":"92000",
                     "last":"7400.5","buy":"7400","sell":"7401","server_time":1578304294,
                     "name":"Bitcoin"}
    },
    "prices_24h": {"tenbtc": "0.000048", "btcusdt": "7350"},
    "prices_7d": {"tenbtc": "0.000052", "btcusdt": "7100"}
}"#;

/// getInfo with available and frozen balances
pub const USER_INFO_RESPONSE: &str = r#"{
    "success": 1,
    "return": {
        "server_time": 1578304294,
        "balance": {"btc": "1.5", "frozen_btc": "0.5", "idk": "10", "ten": "0", "frozen_ten": "250"},
        "user_id": 4242,
        "name": "Test User",
        "email": "test@example.com"
    }
}"#;

/// trade response for a limit buy on ten_btc
pub const TRADE_RESPONSE: &str = r#"{
    "success": 1,
    "return": {
        "receive_ten": "0",
        "spend_btc": "0",
        "fee": "0",
        "remain_btc": "0.005",
        "order_id": 11223344,
        "balance": {"btc": "0.995", "frozen_btc": "0.005", "ten": "0"}
    }
}"#;

/// openOrders for a single pair
pub const OPEN_ORDERS_RESPONSE: &str = r#"{
    "success": 1,
    "return": {
        "orders": [
            {"order_id": "11223344", "submit_time": "1578304294", "price": "0.00005",
             "type": "buy", "order_ten": "100", "remain_ten": "100"}
        ]
    }
}"#;

/// Exchange rejection of an unknown pair
pub const INVALID_PAIR_ERROR: &str =
    r#"{"success":0,"error":"Invalid pair","error_code":"invalid_pair"}"#;

/// Transport stub returning canned responses and recording requests
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// What the stub saw of one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub body: Option<String>,
    pub token: Option<String>,
    pub signature: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a 200 response with the given body
    pub fn respond(&self, body: &str) {
        self.respond_with(RawResponse::new(200, body));
    }

    pub fn respond_with(&self, response: RawResponse) {
        self.responses.lock().push_back(response);
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: SignedRequest) -> RestResult<RawResponse> {
        self.requests.lock().push(RecordedRequest {
            method: request.method,
            path: request.path,
            params: request.params,
            body: request.body,
            token: request.auth.as_ref().map(|a| a.token.clone()),
            signature: request.auth.as_ref().map(|a| a.signature.clone()),
        });

        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| RestError::Transport("no canned response".to_string()))
    }
}

/// Client with credentials over the given stub
pub fn authenticated_client(transport: &Arc<RecordingTransport>) -> TokenomyClient {
    let env = Environment::public().with_credentials(Credentials::new(TOKEN, SECRET).unwrap());
    TokenomyClient::with_transport(env, transport.clone())
}

/// Client without credentials over the given stub
pub fn public_client(transport: &Arc<RecordingTransport>) -> TokenomyClient {
    TokenomyClient::with_transport(Environment::public(), transport.clone())
}
