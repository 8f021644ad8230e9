//! Data models for sites, parsed feed entries and the normalized news items.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Site`]: A configured news source read from the site list
//! - [`ResolvedSource`]: Which feed URL was actually used for a site
//! - [`RawEntry`]: One entry as produced by the feed parser
//! - [`NewsItem`]: The normalized record persisted to JSON
//!
//! The persisted models use camelCase field names to match the JSON document
//! consumers expect.

use serde::{Deserialize, Serialize};

/// A news source as configured in the site list.
///
/// Sites are immutable once read and are identified by their `url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Human readable name of the outlet.
    pub name: String,
    /// Canonical feed (or site) URL.
    pub url: String,
    /// Free-form description, empty when the site list has none.
    pub description: String,
}

impl Site {
    pub fn new(name: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// The outcome of localization resolution for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSource {
    /// The site this feed belongs to.
    pub site: Site,
    /// The URL the entries were read from.
    pub attempted_url: String,
    /// `true` when `attempted_url` differs from the canonical site URL.
    pub used_localized: bool,
}

impl ResolvedSource {
    pub fn new(site: &Site, attempted_url: &str) -> Self {
        Self {
            site: site.clone(),
            attempted_url: attempted_url.to_string(),
            used_localized: attempted_url != site.url,
        }
    }

    pub fn language(&self) -> Language {
        if self.used_localized {
            Language::Pt
        } else {
            Language::En
        }
    }
}

/// Nested text construct, as carried by Atom entry subtitles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDetail {
    pub value: String,
}

/// A single feed entry as produced by the feed parser.
///
/// Every field is optional; the normalizer decides how missing values are
/// filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub subtitle_detail: Option<TextDetail>,
    pub link: Option<String>,
    pub published: Option<String>,
    pub author: Option<String>,
    /// Category labels in feed order.
    pub tags: Vec<String>,
    /// The first category, mirrored for feeds that only expose one.
    pub category: Option<String>,
}

/// Language tag recorded for every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
}

/// Where a [`NewsItem`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub name: String,
    pub url: String,
    /// The feed URL the entry was actually read from.
    pub localized_url: String,
    pub description: String,
}

/// The article fields extracted from a feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    pub subtitle: String,
    pub summary: String,
    pub link: String,
    pub published: String,
    pub author: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// RFC 3339 timestamp of when the entry was normalized.
    pub fetch_timestamp: String,
    pub language: Language,
}

/// One normalized news item, the unit written to the output document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    pub source: SourceInfo,
    pub article: Article,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> NewsItem {
        NewsItem {
            source: SourceInfo {
                name: "IGN".to_string(),
                url: "https://ign.com/feed".to_string(),
                localized_url: "https://br.ign.com/feed.xml".to_string(),
                description: "gaming".to_string(),
            },
            article: Article {
                title: "Lançamento".to_string(),
                subtitle: String::new(),
                summary: "Resumo".to_string(),
                link: "https://br.ign.com/a".to_string(),
                published: "Mon, 06 May 2025 10:00:00 GMT".to_string(),
                author: "Ana".to_string(),
                categories: vec!["games".to_string()],
            },
            metadata: Metadata {
                fetch_timestamp: "2025-05-06T10:00:00+00:00".to_string(),
                language: Language::Pt,
            },
        }
    }

    #[test]
    fn test_resolved_source_flags_localized_url() {
        let site = Site::new("IGN", "https://ign.com/feed", "gaming");
        let localized = ResolvedSource::new(&site, "https://br.ign.com/feed.xml");
        assert!(localized.used_localized);
        assert_eq!(localized.language(), Language::Pt);

        let canonical = ResolvedSource::new(&site, "https://ign.com/feed");
        assert!(!canonical.used_localized);
        assert_eq!(canonical.language(), Language::En);
    }

    #[test]
    fn test_news_item_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(json["source"]["localizedUrl"], "https://br.ign.com/feed.xml");
        assert_eq!(json["metadata"]["fetchTimestamp"], "2025-05-06T10:00:00+00:00");
        assert_eq!(json["metadata"]["language"], "pt");
        assert_eq!(json["article"]["categories"][0], "games");
    }

    #[test]
    fn test_news_item_deserialization() {
        let json = r#"{
            "source": {"name": "Kotaku", "url": "https://kotaku.com", "localizedUrl": "https://kotaku.com", "description": ""},
            "article": {"title": "T", "subtitle": "", "summary": "", "link": "", "published": "", "author": "", "categories": []},
            "metadata": {"fetchTimestamp": "2025-05-06T10:00:00+00:00", "language": "en"}
        }"#;

        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.source.name, "Kotaku");
        assert_eq!(item.metadata.language, Language::En);
        assert!(item.article.categories.is_empty());
    }
}
