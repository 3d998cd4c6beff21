//! Flat directory walker

use crate::types::{EntryKind, MirrorError, PathEntry, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Flat enumeration of every file, directory and symlink under a root
///
/// Uses the `ignore` crate for traversal with all of its own filtering
/// turned off: no `.gitignore` handling, no hidden-file skipping. Exclusion
/// is left entirely to the caller's rule set. The root itself is not
/// yielded and symlinks are reported, never followed.
pub struct TreeWalk {
    root: PathBuf,
    inner: ignore::Walk,
}

impl TreeWalk {
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Start a flat walk of `root_path`
///
/// Entries come out sorted by file name within each directory, which keeps
/// copies deterministic. Parent-before-child order is not part of the
/// contract callers may rely on.
pub fn walk_tree(root_path: &Path) -> TreeWalk {
    let inner = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .hidden(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    TreeWalk {
        root: root_path.to_path_buf(),
        inner,
    }
}

impl Iterator for TreeWalk {
    type Item = Result<PathEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(e))),
            };

            if entry.depth() == 0 {
                continue;
            }

            // Get file type - None only happens for stdin entries
            let Some(file_type) = entry.file_type() else {
                continue;
            };

            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                // Pipes, sockets, devices
                warn!(path = %entry.path().display(), "skipping special file");
                continue;
            };

            debug!(path = %entry.path().display(), ?kind, "walked entry");
            return Some(Ok(PathEntry::new(entry.into_path(), kind)));
        }
    }
}

fn walk_error(error: ignore::Error) -> MirrorError {
    let message = error.to_string();
    match error.into_io_error() {
        Some(io_error) => MirrorError::Io(io_error),
        None => MirrorError::Io(io::Error::other(message)),
    }
}
