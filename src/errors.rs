use hyper::StatusCode;
use thiserror::Error;

pub fn internal_error(err: LiveSearchError) -> (StatusCode, String) {
        match err {
            LiveSearchError::Render(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.into()),
        }
}

pub enum LiveSearchError<'de> {
    /// Internal Server Error, code 500
    Render(&'de str),
}

/// Failure of a single live-search request. Never shown to the user; the
/// watcher logs it and leaves the results container untouched.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid search endpoint {endpoint}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search endpoint answered with status {0}")]
    Status(StatusCode),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{key} must be set! Check your .env file!")]
    Missing { key: &'static str },

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("unsupported selector {0:?}, only #id selectors are supported")]
    Unsupported(String),

    #[error("no element matches {0:?}")]
    NotFound(String),
}
