//! Configuration management

mod settings;

pub use settings::PackageSettings;
pub(crate) use settings::ensure_contained;

use crate::glob::RuleSet;
use crate::installer::{InstallOptions, Package, PackageType};
use crate::types::MirrorError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command line interface
#[derive(Debug, Parser)]
#[command(name = "pkgmirror", version, about = "Copy package files into a project, filtered by glob rules")]
pub struct Cli {
    /// Log every copied and excluded entry
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy a file or mirror a directory tree
    Copy {
        /// File or directory to copy (a missing source is a no-op)
        source: PathBuf,

        /// Where to copy it to
        destination: PathBuf,

        /// Exclude entries matching this root-relative glob (repeatable)
        #[arg(short, long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Leave an existing destination untouched
        #[arg(long)]
        if_missing: bool,
    },

    /// Install a downloaded package into a project
    Install {
        /// Directory of the downloaded package
        package_dir: PathBuf,

        /// Package type, selects the install policy
        #[arg(long = "type", value_enum)]
        package_type: PackageType,

        /// Package name, e.g. acme/payments
        #[arg(long)]
        name: String,

        /// Project root containing the shop `source/` directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// TOML file with the package's installer settings
        #[arg(long, value_name = "FILE")]
        settings: Option<PathBuf>,

        /// Extra exclusion glob (repeatable)
        #[arg(short, long = "exclude", value_name = "GLOB")]
        exclude: Vec<String>,

        /// Overwrite an existing module or theme directory
        #[arg(long)]
        force: bool,

        /// Treat this as an update of an installed package
        #[arg(long)]
        update: bool,
    },
}

/// Verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

/// Validated work to perform
#[derive(Debug, Clone)]
pub enum Task {
    Copy {
        source: PathBuf,
        destination: PathBuf,
        rules: RuleSet,
        if_missing: bool,
    },
    Install {
        package: Package,
        project_dir: PathBuf,
        options: InstallOptions,
    },
}

/// Global configuration for a pkgmirror run
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: LogLevel,
    pub task: Task,
}

impl TryFrom<Cli> for Config {
    type Error = MirrorError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let log_level = if cli.verbose {
            LogLevel::Debug
        } else if cli.quiet {
            LogLevel::Error
        } else {
            LogLevel::Info
        };

        let task = match cli.command {
            Command::Copy {
                source,
                destination,
                exclude,
                if_missing,
            } => {
                if source.as_os_str().is_empty() || destination.as_os_str().is_empty() {
                    return Err(MirrorError::Config(
                        "Source and destination must not be empty".to_string(),
                    ));
                }
                Task::Copy {
                    source,
                    destination,
                    rules: RuleSet::new(&exclude)?,
                    if_missing,
                }
            }
            Command::Install {
                package_dir,
                package_type,
                name,
                project_dir,
                settings,
                exclude,
                force,
                update,
            } => {
                if name.trim().is_empty() {
                    return Err(MirrorError::Config(
                        "Package name must not be empty".to_string(),
                    ));
                }
                ensure_contained("package name", &name)?;
                if !package_dir.is_dir() {
                    return Err(MirrorError::Config(format!(
                        "Package directory does not exist: {}",
                        package_dir.display()
                    )));
                }

                let settings = match settings {
                    Some(path) => PackageSettings::load(&path)?,
                    None => PackageSettings::default(),
                };
                // Fail on a bad glob now rather than halfway through an install
                RuleSet::new(settings.blacklist_filter.iter().chain(exclude.iter()))?;

                Task::Install {
                    package: Package {
                        name,
                        path: package_dir,
                        package_type,
                        settings,
                    },
                    project_dir,
                    options: InstallOptions {
                        force,
                        update,
                        extra_excludes: exclude,
                    },
                }
            }
        };

        Ok(Config { log_level, task })
    }
}
