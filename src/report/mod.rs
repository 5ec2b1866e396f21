//! Report renderers for grouping results.
//!
//! - [`terminal`] — the plain group listing on stdout, with header and summary on stderr.
//! - [`table`] — one table row per group.
//!
//! JSON output is a direct `serde_json` dump of the groups.

pub mod table;
pub mod terminal;
