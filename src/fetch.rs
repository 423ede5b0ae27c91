//! Page fetcher.
//!
//! One blocking-style GET per page: no retries, no session state beyond the
//! shared `reqwest::Client`, and a per-request timeout so a stalled server
//! cannot hang a run.

use crate::error::ScrapeError;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET `url` and return its body. Any non-2xx status is a
    /// [`ScrapeError::Transport`].
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Transport {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().await?;
        debug!(bytes = body.len(), %status, "Fetched page");
        Ok(body)
    }
}
