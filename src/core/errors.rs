use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    /// A mandatory field was missing or empty; the request was never sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Malformed number: {0:?}")]
    MalformedNumber(String),

    /// The exchange could not be reached or the response body could not be read.
    #[error("Transport failed: {0}")]
    TransportFailed(String),

    /// Non-200 response carrying the exchange's structured `{code, msg}` body.
    #[error("API error: {code} - {message}")]
    ApiRejected { code: i64, message: String },

    /// The response (or its error body) did not have the expected shape.
    #[error("Response decode error: {0}")]
    ResponseDecodeError(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl ExchangeError {
    /// Exchange error code when the exchange rejected the call
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::ApiRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_api_rejection(&self) -> bool {
        matches!(self, Self::ApiRejected { .. })
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::TransportFailed(err.to_string())
        }
    }
}
