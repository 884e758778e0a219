//! HTTP transport backed by an async [`reqwest::Client`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::Transport;
use crate::config::HttpConfig;
use crate::error::FeedError;

/// Fetches feed payloads over HTTP(S).
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FeedError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        debug!(url, "fetching feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Network(format!("failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedError::Network(format!(
                "HTTP error {} for {url}",
                response.status()
            )));
        }

        // Raw bytes: the HTTP charset is often missing or wrong for feeds,
        // the XML prolog is authoritative.
        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Network(format!("failed to read {url}: {e}")))?;
        Ok(body.to_vec())
    }
}
