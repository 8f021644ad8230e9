//! Feed retrieval and parsing.
//!
//! A [`FeedSource`] turns a URL into the list of entries found at that URL.
//! The fallback policy lives one level up in [`crate::fetcher`]; sources only
//! know how to fetch and parse a single URL.
//!
//! # Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`http`] | `reqwest` backed source used by the binary |
//! | [`parser`] | RSS, Atom and JSON Feed parsing with `feed-rs` |

pub mod http;
pub mod parser;

use crate::models::RawEntry;
use thiserror::Error;

pub use parser::FeedParseError;

/// Why a feed URL could not be turned into entries.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not parse feed at {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: FeedParseError,
    },
    #[error("feed at {url} has no entries")]
    NoEntries { url: String },
}

impl FetchError {
    pub fn transport(url: &str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport {
            url: url.to_string(),
            source: source.into(),
        }
    }

    /// The URL the failing attempt was made against.
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Parse { url, .. }
            | Self::NoEntries { url } => url,
        }
    }
}

/// Anything that can fetch and parse the feed at a URL.
pub trait FeedSource {
    /// Retrieve the feed at `url` and return its entries in document order.
    ///
    /// An empty but well-formed feed is `Ok(vec![])`, not an error.
    async fn retrieve(&self, url: &str) -> Result<Vec<RawEntry>, FetchError>;
}

impl<T: FeedSource + ?Sized> FeedSource for &T {
    async fn retrieve(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
        (**self).retrieve(url).await
    }
}

/// Canned feed sources for exercising the pipeline without a network.
#[cfg(test)]
pub(crate) mod testing {
    use super::{FeedSource, FetchError};
    use crate::models::RawEntry;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub enum StubResponse {
        Entries(Vec<RawEntry>),
        TransportError,
    }

    /// Serves fixed responses per URL and records every requested URL.
    ///
    /// URLs without a configured response fail with a transport error.
    #[derive(Debug, Default)]
    pub struct StubFeedSource {
        responses: HashMap<String, StubResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl StubFeedSource {
        pub fn with_entries(mut self, url: &str, entries: Vec<RawEntry>) -> Self {
            self.responses
                .insert(url.to_string(), StubResponse::Entries(entries));
            self
        }

        pub fn with_titles(self, url: &str, titles: &[&str]) -> Self {
            let entries = titles.iter().map(|t| entry(t)).collect();
            self.with_entries(url, entries)
        }

        pub fn with_transport_error(mut self, url: &str) -> Self {
            self.responses
                .insert(url.to_string(), StubResponse::TransportError);
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl FeedSource for StubFeedSource {
        async fn retrieve(&self, url: &str) -> Result<Vec<RawEntry>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.responses.get(url) {
                Some(StubResponse::Entries(entries)) => Ok(entries.clone()),
                Some(StubResponse::TransportError) | None => {
                    Err(FetchError::transport(url, "connection refused"))
                }
            }
        }
    }

    pub fn entry(title: &str) -> RawEntry {
        RawEntry {
            title: Some(title.to_string()),
            link: Some(format!("https://example.com/{}", title.to_lowercase())),
            ..RawEntry::default()
        }
    }
}
