//! PathEntry - a single object discovered during a tree walk

use std::path::{Path, PathBuf};

/// Kind of filesystem object behind an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Symbolic link, never followed
    Symlink,
}

/// A filesystem object found under a walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Absolute (root-joined) path of the object
    pub path: PathBuf,

    /// What the object is
    pub kind: EntryKind,
}

impl PathEntry {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        Self { path, kind }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// Path of this entry relative to `root`
    ///
    /// Returns `None` when the entry does not live under `root`.
    pub fn relative_to(&self, root: &Path) -> Option<&Path> {
        self.path.strip_prefix(root).ok()
    }
}

/// Render a relative path with `/` separators regardless of platform
///
/// Used for labels and log output. Non-UTF-8 bytes are replaced, so rule
/// matching goes through the `Path` itself instead.
pub fn to_slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
