//! Error types for REST API operations

use tokenomy_auth::AuthError;
use tokenomy_types::{InvalidPairName, MalformedNumber};

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Private endpoint called without token and secret
    #[error("unauthenticated connection")]
    Unauthenticated,

    /// Pair parameter is empty or not in the registry
    #[error("invalid or empty pair name: {0:?}")]
    InvalidPairName(String),

    /// Decimal literal could not be parsed exactly
    #[error(transparent)]
    MalformedNumber(#[from] MalformedNumber),

    /// Response does not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Well-formed response reporting a business failure
    #[error("exchange error {code:?}: {message}")]
    Exchange {
        /// Error code as sent by the exchange (e.g., "invalid_pair")
        code: String,
        /// Error message as sent by the exchange
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Custom transport failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Check if this error was raised before any network interaction
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::InvalidPairName(_) | Self::InvalidParameter(_)
        )
    }

    /// Error code reported by the exchange, if this is an exchange error
    pub fn exchange_code(&self) -> Option<&str> {
        match self {
            Self::Exchange { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if retrying the same call could succeed
    ///
    /// This layer never retries on its own; the flag is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Transport(_) => true,
            _ => false,
        }
    }
}

impl From<InvalidPairName> for RestError {
    fn from(err: InvalidPairName) -> Self {
        Self::InvalidPairName(err.0)
    }
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Encoding(msg) => Self::InvalidParameter(msg),
            AuthError::MissingToken
            | AuthError::MissingSecret
            | AuthError::InvalidCredentials(_) => Self::Unauthenticated,
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_errors() {
        assert!(RestError::Unauthenticated.is_local());
        assert!(RestError::InvalidPairName(String::new()).is_local());
        assert!(!RestError::MalformedResponse("x".into()).is_local());

        let exchange = RestError::Exchange {
            code: "invalid_pair".into(),
            message: "Invalid pair".into(),
        };
        assert!(!exchange.is_local());
        assert!(!exchange.is_retryable());
        assert_eq!(exchange.exchange_code(), Some("invalid_pair"));
    }

    #[test]
    fn test_conversions() {
        let err: RestError = AuthError::MissingSecret.into();
        assert!(matches!(err, RestError::Unauthenticated));

        let err: RestError = AuthError::InvalidCredentials("bad key".into()).into();
        assert!(matches!(err, RestError::Unauthenticated));

        let err: RestError = AuthError::Encoding("bad pair".into()).into();
        assert!(matches!(err, RestError::InvalidParameter(m) if m == "bad pair"));

        let err: RestError = InvalidPairName("doge_btc".into()).into();
        assert!(matches!(err, RestError::InvalidPairName(p) if p == "doge_btc"));

        let err: RestError = MalformedNumber::new("x").into();
        assert!(err.to_string().contains("malformed number"));
    }
}
