//! Runtime configuration gathered from arguments and environment variables
//!
//! | Variable            | Meaning                                        |
//! |---------------------|------------------------------------------------|
//! | `TOKENOMY_ADDRESS`  | API server address override                    |
//! | `TOKENOMY_TOKEN`    | API token (public part of the key)             |
//! | `TOKENOMY_SECRET`   | API secret (private part of the key)           |
//! | `TOKENOMY_DEBUG`    | 0 silent, 1 log configuration, 2 log bodies    |
//! | `TOKENOMY_INSECURE` | Accept self-signed certificates (testing only) |
//!
//! Explicit arguments win over variables.

use tracing::info;

use crate::credentials::{Credentials, ENV_SECRET, ENV_TOKEN};

/// Default API server
pub const DEFAULT_ADDRESS: &str = "https://exchange.tokenomy.com";

/// Name of the environment variable overriding the server address
pub const ENV_ADDRESS: &str = "TOKENOMY_ADDRESS";
/// Name of the environment variable holding the debug level
pub const ENV_DEBUG: &str = "TOKENOMY_DEBUG";
/// Name of the environment variable allowing self-signed certificates
pub const ENV_INSECURE: &str = "TOKENOMY_INSECURE";

/// How much the client logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DebugLevel {
    /// Nothing beyond errors returned to the caller
    #[default]
    Silent = 0,
    /// Log the (redacted) configuration once at startup
    Config = 1,
    /// Also log request parameters and response bodies
    Wire = 2,
}

impl DebugLevel {
    /// Lenient parse: anything that is not a plain integer counts as 0,
    /// surrounding whitespace included; values above 2 count as 2
    pub fn parse_lenient(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(n) if n >= 2 => Self::Wire,
            Ok(1) => Self::Config,
            _ => Self::Silent,
        }
    }

    /// Returns true if the configuration should be logged
    pub fn logs_config(&self) -> bool {
        *self >= Self::Config
    }

    /// Returns true if request and response bodies should be logged
    pub fn logs_wire(&self) -> bool {
        *self >= Self::Wire
    }
}

/// Resolved configuration for one client
///
/// Read-only once built; clone it to share between clients.
#[derive(Debug, Clone)]
pub struct Environment {
    address: String,
    credentials: Option<Credentials>,
    debug: DebugLevel,
    is_insecure: bool,
}

impl Environment {
    /// Build from explicit token/secret, falling back to process environment
    ///
    /// An empty argument means "not given". If token or secret is still empty
    /// afterwards the environment has no credentials and every private call
    /// fails with an authentication error.
    pub fn new(token: &str, secret: &str) -> Self {
        Self::from_lookup(token, secret, |name| std::env::var(name).ok())
    }

    /// Build with a custom variable lookup instead of the process environment
    pub fn from_lookup<F>(token: &str, secret: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: &str, name: &str| {
            if explicit.is_empty() {
                lookup(name).unwrap_or_default()
            } else {
                explicit.to_string()
            }
        };

        let token = pick(token, ENV_TOKEN);
        let secret = pick(secret, ENV_SECRET);

        let address = lookup(ENV_ADDRESS)
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        let debug = lookup(ENV_DEBUG)
            .map(|v| DebugLevel::parse_lenient(&v))
            .unwrap_or_default();

        let is_insecure = lookup(ENV_INSECURE).map_or(false, |v| parse_flag(&v));

        let env = Self {
            address,
            credentials: Credentials::new(token, secret).ok(),
            debug,
            is_insecure,
        };

        if env.debug.logs_config() {
            info!(environment = ?env, "Loaded Tokenomy environment");
        }

        env
    }

    /// Environment for public endpoints only, ignoring process variables
    pub fn public() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            credentials: None,
            debug: DebugLevel::Silent,
            is_insecure: false,
        }
    }

    /// Override the server address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Replace the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the debug level
    pub fn with_debug(mut self, debug: DebugLevel) -> Self {
        self.debug = debug;
        self
    }

    /// Allow self-signed certificates
    pub fn with_insecure(mut self, is_insecure: bool) -> Self {
        self.is_insecure = is_insecure;
        self
    }

    /// API server address, without trailing slash
    pub fn address(&self) -> &str {
        self.address.trim_end_matches('/')
    }

    /// Credentials, if both token and secret were provided
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Check if private endpoints are usable
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Logging level
    pub fn debug(&self) -> DebugLevel {
        self.debug
    }

    /// Whether self-signed certificates are accepted
    pub fn is_insecure(&self) -> bool {
        self.is_insecure
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let env = Environment::from_lookup("", "", lookup(&[]));
        assert_eq!(env.address(), DEFAULT_ADDRESS);
        assert!(!env.has_credentials());
        assert_eq!(env.debug(), DebugLevel::Silent);
        assert!(!env.is_insecure());
    }

    #[test]
    fn test_variables_are_read() {
        let env = Environment::from_lookup(
            "",
            "",
            lookup(&[
                (ENV_ADDRESS, "https://staging.example.com/"),
                (ENV_TOKEN, "env-token"),
                (ENV_SECRET, "env-secret"),
                (ENV_DEBUG, "2"),
                (ENV_INSECURE, "true"),
            ]),
        );

        assert_eq!(env.address(), "https://staging.example.com");
        assert_eq!(env.credentials().unwrap().token(), "env-token");
        assert_eq!(env.debug(), DebugLevel::Wire);
        assert!(env.is_insecure());
    }

    #[test]
    fn test_explicit_arguments_take_precedence() {
        let env = Environment::from_lookup(
            "arg-token",
            "arg-secret",
            lookup(&[(ENV_TOKEN, "env-token"), (ENV_SECRET, "env-secret")]),
        );
        assert_eq!(env.credentials().unwrap().token(), "arg-token");
    }

    #[test]
    fn test_missing_secret_means_no_credentials() {
        let env = Environment::from_lookup("arg-token", "", lookup(&[]));
        assert!(!env.has_credentials());
    }

    #[test]
    fn test_malformed_debug_level_defaults_to_silent() {
        for raw in ["", "verbose", "1.5", "-3", " 1 ", "2\n"] {
            let env = Environment::from_lookup("", "", lookup(&[(ENV_DEBUG, raw)]));
            assert_eq!(env.debug(), DebugLevel::Silent, "{raw:?}");
        }
        assert_eq!(DebugLevel::parse_lenient("1"), DebugLevel::Config);
        assert_eq!(DebugLevel::parse_lenient("+1"), DebugLevel::Config);
        assert_eq!(DebugLevel::parse_lenient("7"), DebugLevel::Wire);
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let env = Environment::from_lookup("token-1234567890", "super-secret", lookup(&[]));
        let debug = format!("{:?}", env);
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_builder_overrides() {
        let env = Environment::public()
            .with_address("http://127.0.0.1:8080")
            .with_debug(DebugLevel::Config)
            .with_insecure(true)
            .with_credentials(Credentials::new("t", "s").unwrap());

        assert_eq!(env.address(), "http://127.0.0.1:8080");
        assert!(env.debug().logs_config());
        assert!(!env.debug().logs_wire());
        assert!(env.has_credentials());
    }
}
