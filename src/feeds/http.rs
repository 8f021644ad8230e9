//! HTTP feed source backed by `reqwest`.

use super::{FeedSource, FetchError, parser};
use crate::models::RawEntry;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches feeds over HTTP(S) with a shared client.
///
/// Every attempt is bounded by the client timeout. Non-2xx responses count as
/// transport failures, the same as connection errors.
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

impl FeedSource for HttpFeedSource {
    #[instrument(level = "debug", skip(self))]
    async fn retrieve(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Feed request returned a non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(url, e))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Downloaded feed"
        );

        parser::parse_feed(&body).map_err(|source| FetchError::Parse {
            url: url.to_string(),
            source,
        })
    }
}
