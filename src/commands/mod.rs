//! Command runners behind the CLI

pub mod copy;
pub mod install;

use crate::config::Task;
use crate::types::Result;

/// Run a validated task and return the summary to show the user
pub fn execute(task: Task) -> Result<String> {
    match task {
        Task::Copy {
            source,
            destination,
            rules,
            if_missing,
        } => {
            let stats = copy::run(&source, &destination, &rules, if_missing)?;
            Ok(copy::format_summary(&stats))
        }
        Task::Install {
            package,
            project_dir,
            options,
        } => {
            let report = install::run(&package, &project_dir, &options)?;
            Ok(install::format_summary(&package, &report))
        }
    }
}
