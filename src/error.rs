use thiserror::Error;

/// Errors that abort a scrape before any HTML is extracted
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid URL {input:?}: {reason}")]
    InvalidUrl { input: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("too many redirects: {0}")]
    TooManyRedirects(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

impl FetchError {
    pub(crate) fn invalid_url(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_redirect() {
            FetchError::TooManyRedirects(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Errors raised by a [`crate::store::RecordStore`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a record for {url} already exists")]
    Conflict { url: String },
    #[error("no record with id {id}")]
    NotFound { id: String },
}
