//! Credentials, request signing and configuration for the Tokenomy API
//!
//! Private endpoints take a form body signed with HMAC-SHA512 over its
//! canonical encoding. The API token travels next to the signature; the
//! secret never leaves this crate.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use tokenomy_auth::{Credentials, RequestSigner};
//!
//! let creds = Credentials::new("my-token", "my-secret").unwrap();
//! let signed = RequestSigner::new(&creds)
//!     .sign("getInfo", BTreeMap::new())
//!     .unwrap();
//!
//! assert_eq!(signed.params["method"], "getInfo");
//! assert_eq!(signed.signature.len(), 128);
//! ```

mod credentials;
mod environment;
mod error;

pub use credentials::{
    canonical_encode, sign, timestamp_millis, Credentials, RequestSigner, SignedParams,
    ENV_SECRET, ENV_TOKEN, FIELD_METHOD, FIELD_TIMESTAMP,
};
pub use environment::{
    DebugLevel, Environment, DEFAULT_ADDRESS, ENV_ADDRESS, ENV_DEBUG, ENV_INSECURE,
};
pub use error::{AuthError, AuthResult};
