//! RSS and Atom parsing.
//!
//! Documents are parsed with `feed-rs`, which handles RSS 0.9x/1.0/2.0, Atom
//! and JSON Feed along with their usual extension namespaces (Dublin Core,
//! Media RSS, `content:encoded`, `atom:link`). Its entries are mapped onto
//! [`RawEntry`]:
//!
//! | Field | RSS | Atom |
//! |-------|-----|------|
//! | `summary` | `description` | `summary`, else `content` |
//! | `published` | `pubDate` / `dc:date` | `published`, else `updated` |
//! | `author` | `author` / `dc:creator` | first `author/name` |
//! | `link` | `link` | `alternate` (or rel-less) `link@href` |
//! | `tags` | every `category` | every `category@term` |
//!
//! RSS `content:encoded` carries the full article body and is not used.
//!
//! HTML named entities (`&eacute;`, `&nbsp;`) are not legal XML but are common
//! in feeds. Before parsing they are rewritten to numeric character
//! references, and unknown ones to literal text, so one stray entity does not
//! fail the whole document. CDATA sections are left untouched. Markup inside
//! text fields is kept; cleaning is the normalizer's job.

use crate::models::RawEntry;
use feed_rs::model::{Entry, FeedType};
use feed_rs::parser::{self, ParseFeedError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").expect("valid entity regex"));

/// Entities XML defines itself.
const XML_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

#[derive(Debug, Error)]
pub enum FeedParseError {
    #[error("not a readable feed: {0}")]
    Feed(#[from] ParseFeedError),
}

/// Parse an RSS, Atom or JSON feed into entries, in document order.
pub fn parse_feed(body: &[u8]) -> Result<Vec<RawEntry>, FeedParseError> {
    let feed = match std::str::from_utf8(body) {
        Ok(text) => parser::parse(escape_html_entities(text).as_bytes())?,
        Err(_) => parser::parse(body)?,
    };

    let feed_type = feed.feed_type;
    let entries: Vec<RawEntry> = feed
        .entries
        .into_iter()
        .map(|entry| into_raw_entry(entry, &feed_type))
        .collect();
    debug!(count = entries.len(), ?feed_type, "Parsed feed entries");
    Ok(entries)
}

fn into_raw_entry(entry: Entry, feed_type: &FeedType) -> RawEntry {
    let link = entry
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or(entry.links.first())
        .map(|l| l.href.clone());

    let tags: Vec<String> = entry
        .categories
        .into_iter()
        .map(|c| c.term)
        .filter(|t| !t.is_empty())
        .collect();

    let summary = entry
        .summary
        .map(|s| s.content)
        .filter(|s| !s.is_empty())
        .or_else(|| match feed_type {
            FeedType::Atom => entry.content.and_then(|c| c.body),
            _ => None,
        });

    RawEntry {
        title: entry.title.map(|t| t.content),
        summary,
        description: None,
        subtitle: None,
        subtitle_detail: None,
        link,
        published: entry
            .published
            .or(entry.updated)
            .map(|d| d.to_rfc3339()),
        author: entry
            .authors
            .into_iter()
            .map(|p| p.name)
            .find(|n| !n.is_empty()),
        category: tags.first().cloned(),
        tags,
    }
}

/// Rewrite HTML named entities outside CDATA sections so the document is
/// well-formed XML.
fn escape_html_entities(xml: &str) -> Cow<'_, str> {
    let needs_rewrite = ENTITY
        .captures_iter(xml)
        .any(|caps| !XML_ENTITIES.contains(&&caps[1]));
    if !needs_rewrite {
        return Cow::Borrowed(xml);
    }

    let mut out = String::with_capacity(xml.len());
    let mut rest = xml;
    while let Some(start) = rest.find("<![CDATA[") {
        out.push_str(&replace_entities(&rest[..start]));
        let end = rest[start..]
            .find("]]>")
            .map(|i| start + i + 3)
            .unwrap_or(rest.len());
        out.push_str(&rest[start..end]);
        rest = &rest[end..];
    }
    out.push_str(&replace_entities(rest));
    Cow::Owned(out)
}

fn replace_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures| {
        let name = &caps[1];
        if XML_ENTITIES.contains(&name) {
            return caps[0].to_string();
        }
        let decoded = html_escape::decode_html_entities(&caps[0]);
        if *decoded != caps[0] {
            decoded.chars().map(|c| format!("&#{};", c as u32)).collect()
        } else {
            format!("&amp;{name};")
        }
    })
}
