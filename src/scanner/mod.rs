//! Directory scanning logic

mod filter;
mod walker;

pub use filter::FilteredEntries;
pub use walker::{walk_tree, TreeWalk};
