//! Response envelope decoding
//!
//! Private responses are wrapped:
//!
//! ```json
//! {"success": 1, "return": { ... }}
//! {"success": 0, "error": "Invalid pair", "error_code": "invalid_pair"}
//! ```
//!
//! Public responses are bare payloads. A failure carries a top-level
//! `error` field, optionally with `is_error` set.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::transport::RawResponse;

/// Longest body excerpt quoted in a malformed-response error
const BODY_EXCERPT_LEN: usize = 200;

/// Outcome reported by the exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope<T> {
    Success(T),
    Failure { code: String, message: String },
}

impl<T> Envelope<T> {
    /// Returns true for [`Envelope::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Get the payload, turning a failure into [`RestError::Exchange`]
    pub fn into_result(self) -> RestResult<T> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure { code, message } => Err(RestError::Exchange { code, message }),
        }
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decode a private (`/tapi`) response
    ///
    /// The payload is decoded only when `success` is set, so a failure never
    /// trips over a payload that does not match `T`.
    pub fn from_private(raw: &RawResponse) -> RestResult<Self> {
        let wrapper: PrivateWrapper = parse_body(raw)?;

        if !wrapper.success.0 {
            return failure(wrapper.error_code, wrapper.error);
        }

        let payload = wrapper
            .payload
            .ok_or_else(|| RestError::MalformedResponse("missing field `return`".to_string()))?;

        Ok(Self::Success(T::deserialize(payload)?))
    }

    /// Decode a public (`/api/...`) response
    pub fn from_public(raw: &RawResponse) -> RestResult<Self> {
        let value: Value = parse_body(raw)?;

        if value.get("is_error").map_or(false, is_truthy) {
            return failure(field_text(&value, "error_code"), field_text(&value, "error"));
        }

        if let Some(code) = field_text(&value, "error") {
            let message = field_text(&value, "error_description")
                .or_else(|| field_text(&value, "message"))
                .unwrap_or_else(|| code.clone());
            return Ok(Self::Failure { code, message });
        }

        Ok(Self::Success(T::deserialize(value)?))
    }
}

/// Decode a private response straight to its payload
pub fn decode_private<T: DeserializeOwned>(raw: &RawResponse) -> RestResult<T> {
    Envelope::from_private(raw)?.into_result()
}

/// Decode a public response straight to its payload
pub fn decode_public<T: DeserializeOwned>(raw: &RawResponse) -> RestResult<T> {
    Envelope::from_public(raw)?.into_result()
}

#[derive(Deserialize)]
struct PrivateWrapper {
    success: SuccessFlag,
    #[serde(default)]
    error: Option<String>,
    #[serde(default, deserialize_with = "code_text")]
    error_code: Option<String>,
    #[serde(default, rename = "return")]
    payload: Option<Value>,
}

/// `success` as sent by the exchange: `1`/`0`, booleans accepted
struct SuccessFlag(bool);

impl<'de> Deserialize<'de> for SuccessFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Bool(b) => Ok(Self(b)),
            Value::Number(n) if n.as_u64() == Some(1) => Ok(Self(true)),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(Self(false)),
            other => Err(de::Error::custom(format!(
                "invalid `success` flag: {}",
                other
            ))),
        }
    }
}

/// Error codes are usually strings but some endpoints send numbers
fn code_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .filter(|v| !v.is_null())
        .map(|v| text_of(&v)))
}

/// A failure needs a code or a message; empty strings count as missing
fn failure<T>(code: Option<String>, message: Option<String>) -> RestResult<Envelope<T>> {
    let code = code.filter(|c| !c.is_empty());
    let message = message.filter(|m| !m.is_empty());

    if code.is_none() && message.is_none() {
        return Err(RestError::MalformedResponse(
            "failure without error code or message".to_string(),
        ));
    }

    Ok(Envelope::Failure {
        code: code.unwrap_or_default(),
        message: message.unwrap_or_default(),
    })
}

/// Text of a top-level field; null counts as absent
fn field_text(value: &Value, key: &str) -> Option<String> {
    value.get(key).filter(|v| !v.is_null()).map(text_of)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64().map_or(false, |n| n != 0),
        _ => false,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_body<T: DeserializeOwned>(raw: &RawResponse) -> RestResult<T> {
    serde_json::from_slice(&raw.body).map_err(|e| {
        let text = raw.text();
        let excerpt: String = text.chars().take(BODY_EXCERPT_LEN).collect();
        RestError::MalformedResponse(format!("HTTP {}: {} (body: {:?})", raw.status, e, excerpt))
    })
}
