//! Aggregation run over the site list.
//!
//! Sites are processed one at a time in list order:
//!
//! 1. Fetch the site's feed (localized first, see [`crate::fetcher`])
//! 2. Normalize the newest `entries_per_site` entries
//! 3. Record a failure instead of aborting when the fetch fails
//! 4. Pause before moving on, whether the site succeeded or not
//!
//! Every site yields a [`SiteOutcome`]; the outcomes are folded into an
//! [`AggregationResult`] once the loop finishes.

use crate::feeds::{FeedSource, FetchError};
use crate::fetcher::FeedFetcher;
use crate::models::{NewsItem, Site};
use crate::normalize::normalize_entry;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

/// Entries taken from the top of each feed.
pub const DEFAULT_ENTRIES_PER_SITE: usize = 2;
/// Pause after each site.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// What happened to one site during a run.
#[derive(Debug)]
pub enum SiteOutcome {
    Fetched { site: String, items: Vec<NewsItem> },
    Failed(SiteFailure),
}

#[derive(Debug)]
pub struct SiteFailure {
    pub site: String,
    pub error: FetchError,
}

/// Items in site-list order, plus the sites that could not be fetched.
#[derive(Debug, Default)]
pub struct AggregationResult {
    pub items: Vec<NewsItem>,
    pub failures: Vec<SiteFailure>,
}

impl FromIterator<SiteOutcome> for AggregationResult {
    fn from_iter<I: IntoIterator<Item = SiteOutcome>>(outcomes: I) -> Self {
        let mut result = AggregationResult::default();
        for outcome in outcomes {
            match outcome {
                SiteOutcome::Fetched { site, items } => {
                    debug!(%site, count = items.len(), "Collected site items");
                    result.items.extend(items);
                }
                SiteOutcome::Failed(failure) => result.failures.push(failure),
            }
        }
        result
    }
}

#[derive(Debug)]
pub struct Aggregator<S> {
    fetcher: FeedFetcher<S>,
    entries_per_site: usize,
    pause: Duration,
}

impl<S: FeedSource> Aggregator<S> {
    pub fn new(fetcher: FeedFetcher<S>) -> Self {
        Self {
            fetcher,
            entries_per_site: DEFAULT_ENTRIES_PER_SITE,
            pause: DEFAULT_PAUSE,
        }
    }

    pub fn with_entries_per_site(mut self, entries_per_site: usize) -> Self {
        self.entries_per_site = entries_per_site;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Run over every site in order. Never fails; fetch failures end up in
    /// [`AggregationResult::failures`].
    #[instrument(level = "info", skip_all, fields(sites = sites.len()))]
    pub async fn run(&self, sites: &[Site]) -> AggregationResult {
        let total = sites.len();
        let outcomes: Vec<SiteOutcome> = stream::iter(sites.iter().enumerate())
            .then(|(index, site)| async move {
                info!(site = %site.name, "Processing site {}/{}", index + 1, total);
                let outcome = self.process_site(site).await;
                sleep(self.pause).await;
                outcome
            })
            .collect()
            .await;

        let result: AggregationResult = outcomes.into_iter().collect();
        info!(
            items = result.items.len(),
            failed_sites = result.failures.len(),
            "Aggregation run finished"
        );
        result
    }

    async fn process_site(&self, site: &Site) -> SiteOutcome {
        let feed = match self.fetcher.fetch(site).await {
            Ok(feed) => feed,
            Err(error) => {
                error!(site = %site.name, url = error.url(), error = %error, "Failed to fetch news");
                return SiteOutcome::Failed(SiteFailure {
                    site: site.name.clone(),
                    error,
                });
            }
        };

        let items: Vec<NewsItem> = feed
            .entries
            .iter()
            .take(self.entries_per_site)
            .filter_map(|entry| normalize_entry(entry, &feed.source))
            .inspect(|item| info!(site = %site.name, title = %item.article.title, "Found article"))
            .collect();

        SiteOutcome::Fetched {
            site: site.name.clone(),
            items,
        }
    }
}
