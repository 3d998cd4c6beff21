//! `pkgmirror install`

use crate::installer::{self, InstallOptions, InstallReport, Package};
use crate::types::Result;
use std::path::Path;

pub fn run(package: &Package, project_dir: &Path, options: &InstallOptions) -> Result<InstallReport> {
    installer::install(package, project_dir, options)
}

pub fn format_summary(package: &Package, report: &InstallReport) -> String {
    if report.skipped {
        return format!(
            "Skipped {} ({}): target already exists. Re-run with --force to overwrite.",
            package.name, package.package_type
        );
    }

    let mut lines = Vec::with_capacity(report.steps.len() + 1);
    lines.push(format!(
        "Installed {} ({}): {} file(s), {} excluded",
        package.name, package.package_type, report.total.files_copied, report.total.entries_excluded
    ));
    for (label, stats) in &report.steps {
        if stats.is_noop() {
            continue;
        }
        lines.push(format!("  {:<40} {} file(s)", label, stats.files_copied));
    }
    lines.join("\n")
}
