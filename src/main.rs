//! # Feed Digest
//!
//! Collects the latest headlines from a list of news sites into a single JSON
//! document, preferring a Portuguese-language feed for sites that publish one.
//!
//! ## Usage
//!
//! ```sh
//! feed_digest -s ./sites.txt -o ./news.json
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Registry**: Read the site list
//! 2. **Localization**: Map each site to its localized feed, if any
//! 3. **Fetching**: Download and parse the feed, falling back to the canonical
//!    feed when the localized one is empty
//! 4. **Normalization**: Turn the two newest entries per site into news items
//! 5. **Output**: Write every item to one JSON file
//!
//! Sites are processed one after another with a fixed pause in between, and a
//! site that cannot be fetched is reported and skipped.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cli;
mod feeds;
mod fetcher;
mod localization;
mod models;
mod normalize;
mod outputs;
mod registry;
mod utils;

use aggregator::Aggregator;
use cli::Cli;
use feeds::http::HttpFeedSource;
use fetcher::FeedFetcher;
use localization::LocalizationResolver;
use outputs::json;
use utils::ensure_writable_parent;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: fail before any network work if the output can't be written
    if let Err(e) = ensure_writable_parent(&args.output_file).await {
        error!(
            path = %args.output_file,
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let sites = match registry::read_sites(&args.sites_file).await {
        Ok(sites) => sites,
        Err(e) => {
            error!(path = %args.sites_file, error = %e, "Failed to read site list");
            return Err(e);
        }
    };

    let resolver = match &args.localization_rules {
        Some(path) => LocalizationResolver::load(path).await?,
        None => LocalizationResolver::default(),
    };
    info!(rules = resolver.rules().len(), "Localization rules ready");

    // ---- Fetch, normalize, aggregate ----
    let source = HttpFeedSource::new(Duration::from_secs(args.timeout_secs))?;
    let aggregator = Aggregator::new(FeedFetcher::new(source, resolver))
        .with_entries_per_site(args.entries_per_site)
        .with_pause(Duration::from_millis(args.pause_ms));

    let result = aggregator.run(&sites).await;

    if !result.failures.is_empty() {
        let skipped: Vec<&str> = result.failures.iter().map(|f| f.site.as_str()).collect();
        warn!(count = skipped.len(), sites = ?skipped, "Some sites were skipped");
    }

    // ---- JSON output ----
    json::write_news(&result.items, &args.output_file).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        sites = sites.len(),
        items = result.items.len(),
        failed_sites = result.failures.len(),
        path = %args.output_file,
        "Execution complete"
    );

    Ok(())
}
