//! Command-line interface definitions for Feed Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Paths can also be provided through environment variables.

use clap::Parser;

/// Command-line arguments for the Feed Digest application.
///
/// # Examples
///
/// ```sh
/// # Defaults: read ./sites.txt, write ./news.json
/// feed_digest
///
/// # Custom paths and a replacement localization table
/// feed_digest -s ./config/sites.txt -o ./out/news.json -l ./config/localized.yaml
///
/// # Three entries per site, no pause between sites
/// feed_digest --entries-per-site 3 --pause-ms 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Site list to read
    #[arg(short, long, env = "NEWS_SITES_FILE", default_value = "sites.txt")]
    pub sites_file: String,

    /// JSON file to write
    #[arg(short, long, env = "NEWS_OUTPUT_FILE", default_value = "news.json")]
    pub output_file: String,

    /// YAML list of `{domain, url}` rules replacing the built-in localized feeds
    #[arg(short, long, env = "NEWS_LOCALIZATION_RULES")]
    pub localization_rules: Option<String>,

    /// Number of entries taken from the top of each feed
    #[arg(long, default_value_t = 2)]
    pub entries_per_site: usize,

    /// Pause after each site, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub pause_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["feed_digest"]);

        assert_eq!(cli.sites_file, "sites.txt");
        assert_eq!(cli.output_file, "news.json");
        assert_eq!(cli.localization_rules, None);
        assert_eq!(cli.entries_per_site, 2);
        assert_eq!(cli.pause_ms, 1000);
        assert_eq!(cli.timeout_secs, 30);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "feed_digest",
            "-s",
            "/tmp/sites.txt",
            "-o",
            "/tmp/news.json",
            "-l",
            "/tmp/rules.yaml",
        ]);

        assert_eq!(cli.sites_file, "/tmp/sites.txt");
        assert_eq!(cli.output_file, "/tmp/news.json");
        assert_eq!(cli.localization_rules.as_deref(), Some("/tmp/rules.yaml"));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "feed_digest",
            "--entries-per-site",
            "5",
            "--pause-ms",
            "0",
            "--timeout-secs",
            "10",
        ]);

        assert_eq!(cli.entries_per_site, 5);
        assert_eq!(cli.pause_ms, 0);
        assert_eq!(cli.timeout_secs, 10);
    }
}
