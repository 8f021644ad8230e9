//! JSON output of the aggregated news items.
//!
//! The document is a pretty-printed array of news items. Non-ASCII text is
//! written as is, so Portuguese headlines stay readable in the file.

use crate::models::NewsItem;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize `items` to `path`, replacing any previous file.
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or the write fails.
#[instrument(level = "info", skip_all, fields(%path, count = items.len()))]
pub async fn write_news(items: &[NewsItem], path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(items)?;

    info!("Writing JSON");
    if let Err(e) = fs::write(path, json).await {
        error!(error = %e, "Failed to write JSON");
        return Err(e.into());
    }
    info!("Wrote news JSON file");

    Ok(())
}
