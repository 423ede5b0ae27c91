//! Error types shared by the fetch, extraction and output stages.
//!
//! Every failure here is local to one item (a page, an article, a document
//! listing). Callers log it and move on; only an unsupported domain at the
//! start of a workflow ends that workflow early.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The URL's host has no parsing rule.
    #[error("unsupported domain: {0}")]
    UnsupportedDomain(String),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server answered with a non-success status.
    #[error("GET {url} returned {status}")]
    Transport { url: String, status: StatusCode },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The container a site rule depends on is absent from the page.
    #[error("no <{container}> container found in {url}")]
    MissingContainer { url: String, container: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn invalid_url(url: &str, source: url::ParseError) -> Self {
        ScrapeError::InvalidUrl {
            url: url.to_string(),
            source,
        }
    }
}
