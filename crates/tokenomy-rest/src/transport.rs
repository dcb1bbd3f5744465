//! HTTP transport
//!
//! The client only needs "send this request, give me status and body". The
//! [`Transport`] trait is that seam; [`HttpTransport`] implements it with
//! `reqwest`, tests plug in a recording stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokenomy_auth::Environment;

use crate::client::ClientConfig;
use crate::error::RestResult;
use crate::request::{HttpMethod, SignedRequest, HEADER_KEY, HEADER_SIGN};

/// Status and body of an HTTP response, undecoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, with invalid UTF-8 replaced
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Sends one request and returns the raw response
///
/// Implementations own timeouts and cancellation. They must not retry a
/// signed request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: SignedRequest) -> RestResult<RawResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    address: String,
}

impl HttpTransport {
    /// Build a transport for the environment's server
    ///
    /// Self-signed certificates are accepted only when the environment is
    /// marked insecure.
    pub fn new(env: &Environment, config: &ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .danger_accept_invalid_certs(env.is_insecure())
            .build()?;

        let address = config
            .address
            .as_deref()
            .unwrap_or_else(|| env.address())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http_client,
            address,
        })
    }

    /// Server address requests are sent to
    pub fn address(&self) -> &str {
        &self.address
    }
}

const DEFAULT_USER_AGENT: &str = concat!("tokenomy-rest/", env!("CARGO_PKG_VERSION"));

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: SignedRequest) -> RestResult<RawResponse> {
        let SignedRequest {
            method,
            path,
            params,
            body,
            auth,
            ..
        } = request;

        let url = format!("{}{}", self.address, path);

        let mut builder = match method {
            HttpMethod::Get => self.http_client.get(&url).query(&params),
            HttpMethod::Post => self
                .http_client
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.unwrap_or_default()),
        };

        if let Some(auth) = auth {
            builder = builder
                .header(HEADER_KEY, auth.token)
                .header(HEADER_SIGN, auth.signature);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
