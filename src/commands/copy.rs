//! `pkgmirror copy`

use crate::executor::{copy_if_missing_with_rules, copy_with_rules, CopyStats};
use crate::glob::RuleSet;
use crate::types::Result;
use std::path::Path;

/// Copy `source` to `destination`, overwriting unless `if_missing` is set
pub fn run(source: &Path, destination: &Path, rules: &RuleSet, if_missing: bool) -> Result<CopyStats> {
    if if_missing {
        copy_if_missing_with_rules(source, destination, rules)
    } else {
        copy_with_rules(source, destination, rules)
    }
}

pub fn format_summary(stats: &CopyStats) -> String {
    if stats.is_noop() && stats.entries_excluded == 0 {
        return "Nothing to copy.".to_string();
    }
    format!(
        "Copied: {} file(s), {} symlink(s), {} new dir(s), {} byte(s)  Excluded: {}",
        stats.files_copied,
        stats.symlinks_copied,
        stats.dirs_created,
        stats.bytes_copied,
        stats.entries_excluded
    )
}
