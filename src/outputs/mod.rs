//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the aggregated news items to a single JSON document
//!
//! # Output Structure
//!
//! ```text
//! news.json        # array of news items, site-list order
//! ```

pub mod json;
