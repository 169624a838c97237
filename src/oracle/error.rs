use thiserror::Error;

/// Errors raised when an oracle fails to answer.
///
/// None of these may be read as a negative answer: a failed phrase check is
/// not "phrase does not exist", and a failed search is not "no titles".
#[derive(Debug, Error)]
pub enum OracleError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Backend-reported errors
    #[error("Oracle API error: {message}")]
    Api { message: String },

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A tagger answered with a different number of tags than tokens sent
    #[error("Tagger returned {actual} tags for {expected} tokens")]
    Misaligned { expected: usize, actual: usize },
}

impl OracleError {
    /// Splits transport failures into timeouts and everything else.
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Network(error)
        }
    }

    /// Returns `true` for transient errors (HTTP 5xx, network errors, timeouts).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status } => (500..600).contains(status),
            Self::Serialization(_)
            | Self::Api { .. }
            | Self::InvalidUrl(_)
            | Self::Misaligned { .. } => false,
        }
    }
}
