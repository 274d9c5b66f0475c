//! Application layer errors.
//!
//! These errors represent failures in orchestration, not validation.
//! Validation errors are `DomainError` from `crate::domain`.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while preparing the target or materializing a template.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The target already exists and the run required a fresh path.
    #[error("Target already exists: {}", path.display())]
    TargetExists { path: PathBuf },

    /// The target path exists but is a file (or other non-directory).
    #[error("Target path exists and is not a directory: {}", path.display())]
    TargetNotDirectory { path: PathBuf },

    /// The target directory has entries in it.
    #[error("Target directory is not empty: {}", path.display())]
    TargetNotEmpty { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    FilesystemError { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Wrap an I/O error with the path and operation that produced it.
    pub fn io(path: &Path, operation: &str, err: io::Error) -> Self {
        Self::FilesystemError {
            path: path.to_path_buf(),
            reason: format!("failed to {operation}: {err}"),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TargetExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Drop --fresh to reuse an empty directory".into(),
                "Or pass a different --out path".into(),
            ],
            Self::TargetNotDirectory { path } => vec![
                format!("'{}' is a file, not a directory", path.display()),
                "Pass a different --out path".into(),
            ],
            Self::TargetNotEmpty { path } => vec![
                format!("'{}' already has content", path.display()),
                "Choose an empty or missing directory with --out".into(),
                "A failed earlier run may have left files behind; clear them first".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
                "Files written before the failure are left in place".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TargetExists { .. }
            | Self::TargetNotDirectory { .. }
            | Self::TargetNotEmpty { .. } => ErrorCategory::Precondition,
            Self::FilesystemError { .. } => ErrorCategory::Io,
        }
    }

    /// Path the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::TargetExists { path }
            | Self::TargetNotDirectory { path }
            | Self::TargetNotEmpty { path }
            | Self::FilesystemError { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_helper_keeps_path_and_operation() {
        let err = ApplicationError::io(
            Path::new("/tmp/x"),
            "read file",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.path(), Path::new("/tmp/x"));
        assert_eq!(
            err.to_string(),
            "Filesystem error at /tmp/x: failed to read file: denied"
        );
    }

    #[test]
    fn precondition_messages_name_the_path() {
        let err = ApplicationError::TargetNotEmpty {
            path: PathBuf::from("/srv/out"),
        };
        assert_eq!(err.to_string(), "Target directory is not empty: /srv/out");
        assert_eq!(err.category(), ErrorCategory::Precondition);
    }
}
