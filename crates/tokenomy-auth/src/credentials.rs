//! Authentication credentials for Tokenomy's private API
//!
//! Implements HMAC-SHA512 signing as required by the `/tapi` endpoint.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use std::collections::BTreeMap;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Name of the environment variable holding the API token
pub const ENV_TOKEN: &str = "TOKENOMY_TOKEN";
/// Name of the environment variable holding the API secret
pub const ENV_SECRET: &str = "TOKENOMY_SECRET";

/// Form field selecting the private operation
pub const FIELD_METHOD: &str = "method";
/// Form field carrying the request time in milliseconds
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped and never shows up
/// in `Debug` output.
pub struct Credentials {
    /// API token (public)
    token: String,
    /// API secret (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API token and secret
    ///
    /// # Errors
    /// [`AuthError::MissingToken`] or [`AuthError::MissingSecret`] when either
    /// value is empty.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let token = token.into();
        let secret = secret.into();

        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        if secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        Ok(Self {
            token,
            secret: SecretString::from(secret),
        })
    }

    /// Get the API token
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Sign a parameter set with this secret
    pub fn sign(&self, params: &BTreeMap<String, String>) -> AuthResult<String> {
        sign(params, self.secret.expose_secret())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new secret with the same content)
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self
            .token
            .char_indices()
            .nth(8)
            .map_or(self.token.as_str(), |(idx, _)| &self.token[..idx]);

        f.debug_struct("Credentials")
            .field("token", &format!("{}...", shown))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Canonical encoding of a parameter set
///
/// `application/x-www-form-urlencoded`, keys in ascending byte order. This is
/// both the string that gets signed and the request body that gets sent.
pub fn canonical_encode(params: &BTreeMap<String, String>) -> AuthResult<String> {
    serde_urlencoded::to_string(params).map_err(|e| AuthError::Encoding(e.to_string()))
}

/// Sign a parameter set
///
/// Signature algorithm:
/// 1. Canonically encode the parameters (see [`canonical_encode`])
/// 2. HMAC-SHA512(secret, encoded)
/// 3. Lowercase hex encode result
pub fn sign(params: &BTreeMap<String, String>, secret: &str) -> AuthResult<String> {
    let encoded = canonical_encode(params)?;
    sign_encoded(&encoded, secret)
}

fn sign_encoded(encoded: &str, secret: &str) -> AuthResult<String> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::InvalidCredentials(format!("Invalid secret: {}", e)))?;
    mac.update(encoded.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parameters of a private call after signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    /// All form fields, including `method` and `timestamp`
    pub params: BTreeMap<String, String>,
    /// Canonical encoding of `params`; the request body
    pub body: String,
    /// Hex HMAC-SHA512 of `body`
    pub signature: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Request signer for building authenticated requests
///
/// Each signer captures one timestamp; create a new one per request.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: i64,
}

impl<'a> RequestSigner<'a> {
    /// Create a signer stamped with the current time
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::at(credentials, timestamp_millis())
    }

    /// Create a signer with a fixed timestamp
    pub fn at(credentials: &'a Credentials, timestamp: i64) -> Self {
        Self {
            credentials,
            timestamp,
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Get the API token
    pub fn token(&self) -> &str {
        self.credentials.token()
    }

    /// Add `method` and `timestamp` to the parameters and sign them
    pub fn sign(&self, method: &str, mut params: BTreeMap<String, String>) -> AuthResult<SignedParams> {
        params.insert(FIELD_METHOD.to_string(), method.to_string());
        params.insert(FIELD_TIMESTAMP.to_string(), self.timestamp.to_string());

        let body = canonical_encode(&params)?;
        let signature = sign_encoded(&body, self.credentials.secret.expose_secret())?;

        Ok(SignedParams {
            params,
            body,
            signature,
            timestamp: self.timestamp,
        })
    }
}
