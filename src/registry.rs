//! Site list reader.
//!
//! The site list is a plain text file with one source per line:
//!
//! ```text
//! Sites (URL) | Description
//! IGN (https://www.ign.com/rss/articles/feed) | Games, movies and TV
//! Kotaku (https://kotaku.com/rss)
//! ```
//!
//! The name is everything before the parenthesised URL and the description is
//! whatever follows the first `|`. Lines without an `http(s)://` URL in
//! parentheses, such as the header above, are ignored.

use crate::models::Site;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use url::Url;

static SITE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.+?)\s*\((https?://[^)]+)\)").expect("valid site line regex"));

/// Read and parse the site list at `path`.
#[instrument(level = "info", skip_all, fields(%path))]
pub async fn read_sites(path: &str) -> Result<Vec<Site>, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let sites = parse_sites(&raw);
    info!(count = sites.len(), "Loaded site list");
    Ok(sites)
}

/// Parse site list text, keeping file order.
pub fn parse_sites(raw: &str) -> Vec<Site> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| parse_line(index + 1, line))
        .collect()
}

fn parse_line(line_number: usize, line: &str) -> Option<Site> {
    let Some(caps) = SITE_LINE.captures(line) else {
        debug!(line_number, line, "Skipping line without a site URL");
        return None;
    };

    let url = caps[2].trim();
    if let Err(e) = Url::parse(url) {
        warn!(line_number, url, error = %e, "Skipping site with invalid URL");
        return None;
    }

    let description = line
        .split('|')
        .nth(1)
        .map(str::trim)
        .unwrap_or_default();

    Some(Site::new(caps[1].trim(), url, description))
}
