//! Per-package-type installer policies
//!
//! Each policy only decides which (source, destination, rules) triples to
//! hand to the copy engine, and whether a step overwrites or copies only
//! when missing.

mod component;
mod demodata;
mod module;
mod shop;
mod theme;

use crate::config::{ensure_contained, PackageSettings};
use crate::executor::CopyStats;
use crate::glob::RuleSet;
use crate::types::Result;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Version control files never copied into a project
pub const VCS_FILTER: &[&str] = &["**/.git", "**/.git/**", "**/.gitignore"];

/// Kind of package, selecting the installer policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PackageType {
    /// Shop core: `source/` mirrored into the project
    Shop,
    /// Module: installed under `source/modules/<target>`
    Module,
    /// Theme: templates under `Application/views`, assets under `out`
    Theme,
    /// Demo data: mirrored over the project `source/`
    Demodata,
    /// Component: code only, nothing to copy
    Component,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PackageType::Shop => "shop",
            PackageType::Module => "module",
            PackageType::Theme => "theme",
            PackageType::Demodata => "demodata",
            PackageType::Component => "component",
        };
        f.write_str(label)
    }
}

/// A downloaded package ready to be installed
#[derive(Debug, Clone)]
pub struct Package {
    /// Package name, e.g. `acme/payments`
    pub name: String,
    /// Where the package manager put the package
    pub path: PathBuf,
    pub package_type: PackageType,
    pub settings: PackageSettings,
}

/// Knobs the caller passes to every installer
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Overwrite an existing module/theme target without asking
    pub force: bool,
    /// This is an update of an already installed package
    pub update: bool,
    /// Extra exclusion globs on top of the package's blacklist
    pub extra_excludes: Vec<String>,
}

/// Outcome of one install
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Per-step stats, labelled by destination
    pub steps: Vec<(String, CopyStats)>,
    /// Aggregate over all steps
    pub total: CopyStats,
    /// The install was skipped because its target already existed
    pub skipped: bool,
}

impl InstallReport {
    pub(crate) fn record(&mut self, label: impl Into<String>, stats: CopyStats) {
        self.total.merge(&stats);
        self.steps.push((label.into(), stats));
    }

    pub(crate) fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }
}

/// Everything a policy needs for one install
pub(crate) struct InstallContext<'a> {
    pub package: &'a Package,
    pub project_dir: &'a Path,
    pub options: &'a InstallOptions,
}

impl InstallContext<'_> {
    /// Project directory holding the shop sources
    pub fn shop_source(&self) -> PathBuf {
        self.project_dir.join("source")
    }

    /// Where to copy from inside the package
    pub fn package_source(&self, default_dir: Option<&str>) -> PathBuf {
        match self
            .package
            .settings
            .source_directory
            .as_deref()
            .or(default_dir)
        {
            Some(dir) => self.package.path.join(dir),
            None => self.package.path.clone(),
        }
    }

    /// Install directory name: `target-directory` or the package name
    pub fn target_name(&self) -> &str {
        self.package
            .settings
            .target_directory
            .as_deref()
            .unwrap_or(&self.package.name)
    }

    /// Author blacklist + caller excludes + VCS filter + `fixed`
    pub fn rules(&self, fixed: &[&str]) -> Result<RuleSet> {
        let package_rules = self.package.settings.blacklist_filter.iter().map(String::as_str);
        let extra = self.options.extra_excludes.iter().map(String::as_str);
        RuleSet::new(
            package_rules
                .chain(extra)
                .chain(VCS_FILTER.iter().copied())
                .chain(fixed.iter().copied()),
        )
    }

    /// Whether an existing `target` may be written over
    ///
    /// Stands in for the interactive "overwrite?" question: updates and
    /// forced installs overwrite, a plain install over an existing target
    /// is skipped.
    pub fn may_write(&self, target: &Path) -> bool {
        if !target.exists() || self.options.force || self.options.update {
            return true;
        }
        warn!(
            package = %self.package.name,
            target = %target.display(),
            "target already exists, skipping install (use --force to overwrite)"
        );
        false
    }
}

/// Install `package` into `project_dir` using its type's policy
pub fn install(
    package: &Package,
    project_dir: &Path,
    options: &InstallOptions,
) -> Result<InstallReport> {
    package.settings.validate()?;

    let ctx = InstallContext {
        package,
        project_dir,
        options,
    };
    // The target name becomes a directory under the project
    ensure_contained("install target", ctx.target_name())?;

    info!(
        package = %package.name,
        kind = %package.package_type,
        update = options.update,
        "installing package"
    );

    let report = match package.package_type {
        PackageType::Shop => shop::install(&ctx)?,
        PackageType::Module => module::install(&ctx)?,
        PackageType::Theme => theme::install(&ctx)?,
        PackageType::Demodata => demodata::install(&ctx)?,
        PackageType::Component => component::install(&ctx)?,
    };

    info!(
        package = %package.name,
        files = report.total.files_copied,
        skipped = report.skipped,
        "install finished"
    );
    Ok(report)
}
