//! Rule-based filtering over a flat walk

use crate::glob::RuleSet;
use crate::types::{PathEntry, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lazy, single-pass filter that drops entries matching an exclusion rule
///
/// Each entry's path is made relative to `root` and checked against the
/// rule set; only non-matching entries come out. Excluding a directory does
/// not hide its children, rules have to name them (`vendor/**`). Walk
/// errors pass through untouched.
pub struct FilteredEntries<'r, I> {
    inner: I,
    root: PathBuf,
    rules: &'r RuleSet,
    excluded: usize,
}

impl<'r, I> FilteredEntries<'r, I>
where
    I: Iterator<Item = Result<PathEntry>>,
{
    pub fn new(inner: I, root: &Path, rules: &'r RuleSet) -> Self {
        Self {
            inner,
            root: root.to_path_buf(),
            rules,
            excluded: 0,
        }
    }

    /// Number of entries dropped so far
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }
}

impl<I> Iterator for FilteredEntries<'_, I>
where
    I: Iterator<Item = Result<PathEntry>>,
{
    type Item = Result<PathEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e)),
            };

            let Some(relative) = entry.relative_to(&self.root) else {
                warn!(
                    path = %entry.path.display(),
                    root = %self.root.display(),
                    "entry is outside the walk root, skipping"
                );
                continue;
            };

            if self.rules.is_excluded(relative) {
                debug!(path = %relative.display(), "excluded by rule");
                self.excluded += 1;
                continue;
            }

            return Some(Ok(entry));
        }
    }
}
