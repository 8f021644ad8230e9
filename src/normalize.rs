//! Entry normalization.
//!
//! Converts a [`RawEntry`] plus the [`ResolvedSource`] it came from into a
//! [`NewsItem`]. Entries without a title produce nothing.
//!
//! Free-text fields (summary and subtitle) go through [`clean_markup`], a
//! plain-text reduction: tags are dropped, whitespace runs collapse to a single
//! space and the result is trimmed. Entities are not decoded and malformed
//! markup can leave fragments behind.

use crate::models::{Article, Metadata, NewsItem, RawEntry, ResolvedSource, SourceInfo};
use crate::utils::truncate_for_log;
use chrono::{Local, SecondsFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strip `<...>` spans and collapse whitespace.
///
/// ```ignore
/// assert_eq!(clean_markup("<b>Hello</b>   world"), "Hello world");
/// ```
pub fn clean_markup(text: &str) -> String {
    let without_tags = TAG.replace_all(text, "");
    WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// First non-empty value among `candidates`.
fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|v| !v.is_empty())
}

/// Build a [`NewsItem`] from `entry`, or `None` if it has no usable title.
///
/// The fetch timestamp is the current wall-clock time, not the entry's
/// publish date.
pub fn normalize_entry(entry: &RawEntry, source: &ResolvedSource) -> Option<NewsItem> {
    let title = entry.title.as_deref().filter(|t| !t.trim().is_empty())?;

    let summary = first_present([entry.summary.as_deref(), entry.description.as_deref()])
        .map(clean_markup)
        .unwrap_or_default();

    let subtitle = first_present([
        entry.subtitle.as_deref(),
        entry.subtitle_detail.as_ref().map(|d| d.value.as_str()),
    ])
    .map(clean_markup)
    .unwrap_or_default();

    let categories = if !entry.tags.is_empty() {
        entry.tags.clone()
    } else {
        entry.category.iter().cloned().collect()
    };

    debug!(
        title,
        summary = %truncate_for_log(&summary, 120),
        "Normalized entry"
    );

    Some(NewsItem {
        source: SourceInfo {
            name: source.site.name.clone(),
            url: source.site.url.clone(),
            localized_url: source.attempted_url.clone(),
            description: source.site.description.clone(),
        },
        article: Article {
            title: title.to_string(),
            subtitle,
            summary,
            link: entry.link.clone().unwrap_or_default(),
            published: entry.published.clone().unwrap_or_default(),
            author: entry.author.clone().unwrap_or_default(),
            categories,
        },
        metadata: Metadata {
            fetch_timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            language: source.language(),
        },
    })
}
