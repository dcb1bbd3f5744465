//! Error types shared by the Tokenomy crates

use thiserror::Error;

/// A decimal literal that could not be represented exactly
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed number: {literal:?}")]
pub struct MalformedNumber {
    literal: String,
}

impl MalformedNumber {
    /// Create an error for the rejected literal
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// The literal as it was received
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// Pair identifier that is empty or not in the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid or empty pair name: {0:?}")]
pub struct InvalidPairName(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MalformedNumber::new("1.2.3");
        assert!(err.to_string().contains("1.2.3"));
        assert_eq!(err.literal(), "1.2.3");

        let err = InvalidPairName(String::new());
        assert!(err.to_string().contains("empty pair name"));
    }
}
