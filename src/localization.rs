//! Localized feed selection.
//!
//! Sites can publish a Portuguese-language feed next to their default one.
//! [`LocalizationResolver`] holds an ordered list of rules that map a domain
//! fragment to such a feed. The first rule whose fragment appears anywhere in
//! the canonical URL wins; when nothing matches the canonical URL is used as is.
//!
//! The built-in table can be replaced with a YAML file:
//!
//! ```yaml
//! - domain: ign.com
//!   url: https://br.ign.com/feed.xml
//! - domain: eurogamer.net
//!   url: https://www.eurogamer.pt/?format=rss
//! ```

use serde::Deserialize;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Built-in `(domain fragment, localized feed)` pairs, matched in order.
const DEFAULT_RULES: &[(&str, &str)] = &[
    ("ign.com", "https://br.ign.com/feed.xml"),
    ("gamespot.com", "https://www.gamespot.com/feeds/mashup/"),
    ("kotaku.com", "https://kotaku.com/rss"),
    ("eurogamer.net", "https://www.eurogamer.pt/?format=rss"),
    ("pcgamer.com", "https://www.pcgamer.com/rss/"),
    ("theverge.com", "https://www.theverge.com/gaming/rss/index.xml"),
    ("nintendolife.com", "https://www.nintendolife.com/feeds/news"),
    ("pushsquare.com", "https://www.pushsquare.com/feeds/news"),
    ("purexbox.com", "https://www.purexbox.com/feeds/news"),
    ("rockpapershotgun.com", "https://www.rockpapershotgun.com/feed"),
];

/// A single domain-to-feed mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocalizationRule {
    /// Substring looked for in the canonical URL.
    pub domain: String,
    /// Feed URL used instead when the domain matches.
    pub url: String,
}

/// Maps canonical site URLs to localized feed URLs.
#[derive(Debug, Clone)]
pub struct LocalizationResolver {
    rules: Vec<LocalizationRule>,
}

impl Default for LocalizationResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_RULES
                .iter()
                .map(|(domain, url)| LocalizationRule {
                    domain: domain.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        )
    }
}

impl LocalizationResolver {
    pub fn new(rules: Vec<LocalizationRule>) -> Self {
        Self { rules }
    }

    /// Load the rule table from a YAML list of `{domain, url}` records.
    ///
    /// The file replaces the built-in table entirely and keeps its order.
    #[instrument(level = "info", skip_all, fields(%path))]
    pub async fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = fs::read_to_string(path).await?;
        let rules = Self::parse_rules(&raw)?;
        info!(count = rules.len(), "Loaded localization rules");
        Ok(Self::new(rules))
    }

    fn parse_rules(raw: &str) -> Result<Vec<LocalizationRule>, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn rules(&self) -> &[LocalizationRule] {
        &self.rules
    }

    /// Return the localized feed for `url`, or `url` itself when no rule
    /// matches.
    pub fn resolve<'a>(&'a self, url: &'a str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| url.contains(rule.domain.as_str()))
            .map(|rule| rule.url.as_str())
            .unwrap_or(url)
    }
}
