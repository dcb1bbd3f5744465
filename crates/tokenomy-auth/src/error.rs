//! Error types for authentication operations

/// Errors that can occur while building credentials or signing
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token (public part of the API key) is empty
    #[error("API token is missing")]
    MissingToken,

    /// Secret (private part of the API key) is empty
    #[error("API secret is missing")]
    MissingSecret,

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Parameters could not be form-encoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
