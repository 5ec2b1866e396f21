//! Manifest and lock file discovery and grouping.
//!
//! - [`format`]: per-ecosystem naming rules ([`format::CompiledFormat`]).
//! - [`matcher`]: directory and naming correlation between two files.
//! - [`group`]: one manifest with its lock files.
//! - [`groups`]: the grouping pass over a list of paths.
//! - [`finder`]: filesystem walk feeding the grouping pass.

pub mod finder;
pub mod format;
pub mod group;
pub mod groups;
pub mod matcher;

pub use finder::Finder;
pub use groups::Groups;
