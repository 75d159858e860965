//! Error types for the console sign-in pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Every way a sign-in attempt can fail. Each stage returns exactly one of these
/// and the pipeline stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller credentials are missing, invalid, expired, or not allowed to call STS
    #[error("Failed to obtain federated credentials: {0}")]
    Credential(String),

    #[error("Network error reaching the federation endpoint: {0}")]
    Network(String),

    #[error("Federation endpoint returned {0}, please try again")]
    FederationEndpoint(reqwest::StatusCode),

    #[error("No 'SigninToken' value is returned ({0}), please try again")]
    MalformedResponse(String),

    #[error("Failed to open the browser: {0}")]
    Launch(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network("Request timed out".to_string())
        } else if err.is_connect() {
            Error::Network("Failed to connect to the federation endpoint".to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}
