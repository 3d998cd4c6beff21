//! Error types for pkgmirror

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Error types for copy and install operations
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Malformed input rejected before touching the filesystem
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Glob expression the matcher cannot compile
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error attributed to a specific path
    #[error("IO error at {path}: {source}")]
    IoAt {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Permission denied for specific path
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// No space left while writing to path
    #[error("Disk full while writing {path}")]
    DiskFull { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MirrorError {
    /// Build an invalid-argument error naming the offending value
    pub fn invalid_argument(what: &str, value: impl std::fmt::Display) -> Self {
        MirrorError::InvalidArgument(format!("{} '{}'", what, value))
    }

    /// Classify an IO error that happened while working on `path`
    pub fn at(path: &Path, error: std::io::Error) -> Self {
        if matches!(error.kind(), ErrorKind::PermissionDenied) {
            MirrorError::PermissionDenied {
                path: path.to_path_buf(),
            }
        } else if matches!(error.kind(), ErrorKind::StorageFull)
            || matches!(error.raw_os_error(), Some(28 | 112))
        {
            MirrorError::DiskFull {
                path: path.to_path_buf(),
            }
        } else {
            MirrorError::IoAt {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }

    /// Check if this error was raised by input validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            MirrorError::InvalidArgument(_) | MirrorError::InvalidPattern { .. }
        )
    }

    /// Check if this error came from the filesystem
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            MirrorError::Io(_)
                | MirrorError::IoAt { .. }
                | MirrorError::PermissionDenied { .. }
                | MirrorError::DiskFull { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Error as IoError;

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error: MirrorError = io_error.into();

        assert!(matches!(error, MirrorError::Io(_)));
        assert!(error.to_string().contains("IO error"));
        assert!(error.is_io_error());
    }

    #[test]
    fn test_invalid_argument_names_value() {
        let error = MirrorError::invalid_argument("glob expression must be relative:", "/etc/*");
        assert!(error.to_string().contains("Invalid argument"));
        assert!(error.to_string().contains("/etc/*"));
        assert!(error.is_invalid_argument());
        assert!(!error.is_io_error());
    }

    #[test]
    fn test_invalid_pattern_is_invalid_argument() {
        let error = MirrorError::InvalidPattern {
            pattern: "a[".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert!(error.to_string().contains("a["));
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn test_at_classifies_permission_denied() {
        let error = MirrorError::at(
            Path::new("/protected/file.txt"),
            IoError::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(error, MirrorError::PermissionDenied { .. }));
        assert!(error.to_string().contains("/protected/file.txt"));
        assert!(error.is_io_error());
    }

    #[test]
    fn test_at_classifies_disk_full() {
        let error = MirrorError::at(Path::new("big.bin"), IoError::from_raw_os_error(28));
        assert!(matches!(error, MirrorError::DiskFull { .. }));
        assert!(error.to_string().contains("big.bin"));
    }

    #[test]
    fn test_at_keeps_other_errors_with_path() {
        let error = MirrorError::at(
            Path::new("gone.txt"),
            IoError::new(ErrorKind::NotFound, "missing"),
        );
        match error {
            MirrorError::IoAt { path, source } => {
                assert_eq!(path, PathBuf::from("gone.txt"));
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_error() {
        let error = MirrorError::Config("unknown field `foo`".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(!error.is_invalid_argument());
        assert!(!error.is_io_error());
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<()> {
            Err(MirrorError::InvalidArgument("test".to_string()))
        }

        fn outer_function() -> Result<()> {
            inner_function()?;
            Ok(())
        }

        let result = outer_function();
        assert!(matches!(result, Err(MirrorError::InvalidArgument(_))));
    }
}
