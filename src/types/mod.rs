//! Core type definitions for pkgmirror

mod entry;
mod error;

pub use entry::{to_slash_path, EntryKind, PathEntry};
pub use error::{MirrorError, Result};
