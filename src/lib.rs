//! # pkgmirror - glob-filtered file-tree copy engine
//!
//! Copies files out of downloaded packages into a project. A source is
//! either a single file or a directory tree that gets mirrored; entries
//! whose root-relative path matches an exclusion glob are left behind.
//! On top of the engine sit thin installer policies per package type.

// Module declarations
pub mod commands;
pub mod config;
pub mod executor;
pub mod glob;
pub mod installer;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use config::{Config, PackageSettings};
pub use executor::{copy, copy_if_missing, mirror_overwrite, CopyStats};
pub use glob::{match_any, matches, RuleSet};
pub use types::{EntryKind, MirrorError, PathEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
