//! Shop core installer

use super::{InstallContext, InstallReport};
use crate::executor::{copy_if_missing_with_rules, copy_with_rules, mirror_subtree, CopyStats};
use crate::glob::RuleSet;
use crate::scanner::{walk_tree, FilteredEntries};
use crate::types::{to_slash_path, EntryKind, MirrorError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Files the project owner customizes; never overwritten by the mirror
const FIXED_EXCLUDES: &[&str] = &[
    "**/.htaccess",
    "robots.txt",
    "Setup",
    "Setup/**",
    "offline.html",
    "config.inc.php",
];

const SETUP_DIR: &str = "Setup";
const HTACCESS: &str = ".htaccess";
const CONFIG_FILE: &str = "config.inc.php";
const CONFIG_DIST_FILE: &str = "config.inc.php.dist";

pub(super) fn install(ctx: &InstallContext<'_>) -> Result<InstallReport> {
    let source = ctx.package_source(Some("source"));
    let destination = ctx.shop_source();

    // Validate both rule sets before the first write
    let mirror_rules = ctx.rules(FIXED_EXCLUDES)?;
    let base_rules = ctx.rules(&[])?;

    let mut report = InstallReport::default();
    report.record(
        to_slash_path(&destination),
        copy_with_rules(&source, &destination, &mirror_rules)?,
    );

    if !source.is_dir() {
        return Ok(report);
    }

    copy_htaccess_files(&source, &destination, &base_rules, &mut report)?;

    for name in ["robots.txt", "offline.html"] {
        if base_rules.is_excluded(Path::new(name)) {
            debug!(name, "excluded by package rules, not restoring");
            continue;
        }
        let stats = copy_if_missing_with_rules(
            &source.join(name),
            &destination.join(name),
            &base_rules,
        )?;
        report.record(name, stats);
    }

    if !base_rules.is_excluded(Path::new(SETUP_DIR)) {
        let stats = restore_missing_dir(&source, &destination, SETUP_DIR, &base_rules)?;
        report.record(SETUP_DIR, stats);
    } else {
        debug!(name = SETUP_DIR, "excluded by package rules, not restoring");
    }

    let config_source = if source.join(CONFIG_FILE).is_file() {
        source.join(CONFIG_FILE)
    } else {
        source.join(CONFIG_DIST_FILE)
    };
    let stats = copy_if_missing_with_rules(
        &config_source,
        &destination.join(CONFIG_FILE),
        &RuleSet::empty(),
    )?;
    report.record(CONFIG_FILE, stats);

    Ok(report)
}

/// Restore every `.htaccess` of the package that the project lacks
fn copy_htaccess_files(
    source: &Path,
    destination: &Path,
    rules: &RuleSet,
    report: &mut InstallReport,
) -> Result<()> {
    for entry in FilteredEntries::new(walk_tree(source), source, rules) {
        let entry = entry?;
        if entry.kind != EntryKind::File
            || entry.path.file_name().and_then(|n| n.to_str()) != Some(HTACCESS)
        {
            continue;
        }
        let Some(relative) = entry.relative_to(source) else {
            continue;
        };

        let stats = copy_if_missing_with_rules(
            &entry.path,
            &destination.join(relative),
            &RuleSet::empty(),
        )?;
        report.record(to_slash_path(relative), stats);
    }
    Ok(())
}

/// Copy `source/<name>` to `destination/<name>` when the latter is missing
///
/// Rules are matched against paths relative to `source`, so an author rule
/// such as `Setup/secret.php` still applies inside the restored directory.
fn restore_missing_dir(
    source: &Path,
    destination: &Path,
    name: &str,
    rules: &RuleSet,
) -> Result<CopyStats> {
    let subtree = source.join(name);
    let target_root = destination.join(name);

    if fs::symlink_metadata(&target_root).is_ok() {
        debug!(destination = %target_root.display(), "destination exists, keeping it");
        return Ok(CopyStats::default());
    }
    if !subtree.is_dir() {
        return Ok(CopyStats::default());
    }

    fs::create_dir_all(&target_root).map_err(|e| MirrorError::at(&target_root, e))?;
    let mut stats = mirror_subtree(source, &subtree, destination, rules)?;
    stats.dirs_created += 1;
    Ok(stats)
}
