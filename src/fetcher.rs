//! Localized-first feed fetching.
//!
//! [`FeedFetcher::fetch`] tries the localized feed for a site first. Only an
//! empty result sends it to the canonical feed; a transport or parse error on
//! the localized attempt is returned as is.

use crate::feeds::{FeedSource, FetchError};
use crate::localization::LocalizationResolver;
use crate::models::{RawEntry, ResolvedSource, Site};
use tracing::{debug, instrument, warn};

/// Entries read for a site together with where they were read from.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub entries: Vec<RawEntry>,
    pub source: ResolvedSource,
}

#[derive(Debug)]
pub struct FeedFetcher<S> {
    source: S,
    resolver: LocalizationResolver,
}

impl<S: FeedSource> FeedFetcher<S> {
    pub fn new(source: S, resolver: LocalizationResolver) -> Self {
        Self { source, resolver }
    }

    /// Fetch the feed for `site`, preferring its localized variant.
    ///
    /// # Errors
    ///
    /// - any [`FetchError`] raised by the localized attempt, without trying the
    ///   canonical URL
    /// - any [`FetchError`] raised by the canonical attempt
    /// - [`FetchError::NoEntries`] when the last URL tried has no entries
    #[instrument(level = "info", skip_all, fields(site = %site.name))]
    pub async fn fetch(&self, site: &Site) -> Result<FetchedFeed, FetchError> {
        let localized = self.resolver.resolve(&site.url);
        debug!(url = localized, "Fetching feed");

        let entries = self.source.retrieve(localized).await?;
        if !entries.is_empty() {
            return Ok(FetchedFeed {
                entries,
                source: ResolvedSource::new(site, localized),
            });
        }

        if localized == site.url {
            return Err(FetchError::NoEntries {
                url: site.url.clone(),
            });
        }

        warn!(
            localized_url = localized,
            url = %site.url,
            "Localized feed has no entries; falling back to the canonical feed"
        );
        let entries = self.source.retrieve(&site.url).await?;
        if entries.is_empty() {
            return Err(FetchError::NoEntries {
                url: site.url.clone(),
            });
        }

        Ok(FetchedFeed {
            entries,
            source: ResolvedSource::new(site, &site.url),
        })
    }
}
