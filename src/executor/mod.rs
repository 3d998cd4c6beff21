//! Copy engine
//!
//! Two policies live here side by side and are deliberately not unified:
//! [`copy`] always overwrites what it writes (mirror semantics), while
//! [`copy_if_missing`] leaves an existing destination alone entirely.

pub mod copy;

use crate::glob::RuleSet;
use crate::scanner::{walk_tree, FilteredEntries};
use crate::types::{EntryKind, MirrorError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

pub use copy::{copy_file_atomic, copy_symlink};

/// What a copy operation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Regular files written (new or overwritten)
    pub files_copied: usize,
    /// Directories that did not exist before
    pub dirs_created: usize,
    /// Symlinks recreated at the destination
    pub symlinks_copied: usize,
    /// Entries dropped by the rule set
    pub entries_excluded: usize,
    /// Aggregate copied bytes
    pub bytes_copied: u64,
}

impl CopyStats {
    /// Fold another operation's counters into this one
    pub fn merge(&mut self, other: &CopyStats) {
        self.files_copied += other.files_copied;
        self.dirs_created += other.dirs_created;
        self.symlinks_copied += other.symlinks_copied;
        self.entries_excluded += other.entries_excluded;
        self.bytes_copied += other.bytes_copied;
    }

    /// True when nothing was written
    pub fn is_noop(&self) -> bool {
        self.files_copied == 0 && self.dirs_created == 0 && self.symlinks_copied == 0
    }
}

/// Copy `source` to `destination`, excluding anything matching `rules`
///
/// * Missing source: nothing happens and default stats are returned.
/// * Directory source: the tree is mirrored, see [`mirror_overwrite`].
/// * File source: see [`copy_file`]; rules see only the file name.
///
/// Every rule is validated before the filesystem is touched.
///
/// # Example
/// ```no_run
/// use pkgmirror::executor::copy;
///
/// let stats = copy("vendor/acme/module", "source/modules/acme", &["**/*.txt"])?;
/// println!("{} files copied", stats.files_copied);
/// # Ok::<(), pkgmirror::MirrorError>(())
/// ```
pub fn copy<P, Q, S>(source: P, destination: Q, rules: &[S]) -> Result<CopyStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<str>,
{
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination)?;
    let rules = RuleSet::new(rules)?;
    copy_with_rules(source, destination, &rules)
}

/// [`copy`] with an already compiled rule set
pub fn copy_with_rules(source: &Path, destination: &Path, rules: &RuleSet) -> Result<CopyStats> {
    validate_paths(source, destination)?;

    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(source = %source.display(), "source does not exist, nothing to copy");
            return Ok(CopyStats::default());
        }
        Err(e) => return Err(MirrorError::at(source, e)),
    };

    if metadata.is_dir() {
        mirror_overwrite(source, destination, rules)
    } else {
        copy_file(source, destination, rules)
    }
}

/// Copy only when nothing exists at `destination` yet
///
/// An existing file, directory or symlink at `destination` turns the call
/// into a no-op. Otherwise behaves exactly like [`copy`].
pub fn copy_if_missing<P, Q, S>(source: P, destination: Q, rules: &[S]) -> Result<CopyStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<str>,
{
    let (source, destination) = (source.as_ref(), destination.as_ref());
    validate_paths(source, destination)?;
    let rules = RuleSet::new(rules)?;
    copy_if_missing_with_rules(source, destination, &rules)
}

/// [`copy_if_missing`] with an already compiled rule set
pub fn copy_if_missing_with_rules(
    source: &Path,
    destination: &Path,
    rules: &RuleSet,
) -> Result<CopyStats> {
    validate_paths(source, destination)?;

    if fs::symlink_metadata(destination).is_ok() {
        debug!(destination = %destination.display(), "destination exists, keeping it");
        return Ok(CopyStats::default());
    }

    copy_with_rules(source, destination, rules)
}

/// Mirror the tree under `source_dir` into `destination_dir`
///
/// Every entry not excluded by `rules` (matched against its path relative
/// to `source_dir`) is recreated at the same relative location. Existing
/// destination files are always overwritten. Files present only at the
/// destination are left in place. A failure stops the walk and leaves
/// whatever was already copied.
pub fn mirror_overwrite(
    source_dir: &Path,
    destination_dir: &Path,
    rules: &RuleSet,
) -> Result<CopyStats> {
    validate_paths(source_dir, destination_dir)?;
    if !source_dir.is_dir() {
        return Err(MirrorError::invalid_argument(
            "mirror source is not a directory:",
            source_dir.display(),
        ));
    }
    let resolved_source = resolve(source_dir)?;
    let resolved_destination = resolve(destination_dir)?;
    if resolved_destination != resolved_source
        && resolved_destination.starts_with(&resolved_source)
    {
        return Err(MirrorError::invalid_argument(
            "destination must not be inside the source tree:",
            destination_dir.display(),
        ));
    }

    let mut stats = CopyStats::default();
    if !destination_dir.is_dir() {
        fs::create_dir_all(destination_dir).map_err(|e| MirrorError::at(destination_dir, e))?;
        stats.dirs_created += 1;
    }

    stats.merge(&mirror_subtree(source_dir, source_dir, destination_dir, rules)?);

    info!(
        source = %source_dir.display(),
        destination = %destination_dir.display(),
        files = stats.files_copied,
        excluded = stats.entries_excluded,
        "mirrored directory"
    );
    Ok(stats)
}

/// Mirror the entries below `subtree` into `destination_root`
///
/// Paths are taken relative to `root` (an ancestor of `subtree`, or the
/// subtree itself) both for rule matching and for placement, so
/// `root/Setup/a.php` lands at `destination_root/Setup/a.php`.
pub(crate) fn mirror_subtree(
    root: &Path,
    subtree: &Path,
    destination_root: &Path,
    rules: &RuleSet,
) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    let mut entries = FilteredEntries::new(walk_tree(subtree), root, rules);
    for entry in entries.by_ref() {
        let entry = entry?;
        let Some(relative) = entry.relative_to(root) else {
            continue;
        };
        let target = destination_root.join(relative);

        match entry.kind {
            EntryKind::Dir => {
                if !target.is_dir() {
                    fs::create_dir_all(&target).map_err(|e| MirrorError::at(&target, e))?;
                    stats.dirs_created += 1;
                }
            }
            EntryKind::File => {
                let bytes = copy_file_atomic(&entry.path, &target)?;
                debug!(path = %relative.display(), bytes, "copied");
                stats.files_copied += 1;
                stats.bytes_copied += bytes;
            }
            EntryKind::Symlink => {
                copy_symlink(&entry.path, &target)?;
                debug!(path = %relative.display(), "copied symlink");
                stats.symlinks_copied += 1;
            }
        }
    }
    stats.entries_excluded = entries.excluded_count();
    Ok(stats)
}

/// Copy a single file, unless its file name matches `rules`
///
/// The rule set is evaluated against the bare file name, as if the file's
/// own directory were the copy root. An existing `destination_file` is
/// overwritten.
pub fn copy_file(source_file: &Path, destination_file: &Path, rules: &RuleSet) -> Result<CopyStats> {
    validate_paths(source_file, destination_file)?;

    let mut stats = CopyStats::default();
    let Some(name) = source_file.file_name() else {
        return Err(MirrorError::invalid_argument(
            "source file has no file name:",
            source_file.display(),
        ));
    };

    if rules.is_excluded(Path::new(name)) {
        debug!(source = %source_file.display(), "file excluded by rule, skipping");
        stats.entries_excluded = 1;
        return Ok(stats);
    }

    stats.bytes_copied = copy_file_atomic(source_file, destination_file)?;
    stats.files_copied = 1;

    info!(
        source = %source_file.display(),
        destination = %destination_file.display(),
        bytes = stats.bytes_copied,
        "copied file"
    );
    Ok(stats)
}

/// Absolute form of `path` with symlinks resolved as far as it exists
///
/// `.` and `..` are folded lexically, then the deepest existing ancestor is
/// canonicalized and the missing tail re-appended.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut folded = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                folded.pop();
            }
            other => folded.push(other.as_os_str()),
        }
    }

    let mut existing = folded.as_path();
    let mut missing = Vec::new();
    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                resolved.extend(missing.iter().rev());
                return Ok(resolved);
            }
            Err(_) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Ok(folded),
            },
        }
    }
}

fn validate_paths(source: &Path, destination: &Path) -> Result<()> {
    if source.as_os_str().is_empty() {
        return Err(MirrorError::invalid_argument(
            "source path must not be empty, got",
            source.display(),
        ));
    }
    if destination.as_os_str().is_empty() {
        return Err(MirrorError::invalid_argument(
            "destination path must not be empty, got",
            destination.display(),
        ));
    }
    Ok(())
}
