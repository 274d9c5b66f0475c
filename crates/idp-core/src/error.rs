//! Unified error handling for idp-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for idp-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdpError {
    /// Invalid input (service name, layout rules).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Target precondition or filesystem failure.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl IdpError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` for the "invalid service name" case.
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, Self::Domain(DomainError::InvalidServiceName { .. }))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input; nothing touched the filesystem.
    Validation,
    /// The target directory failed its precondition check; nothing was written.
    Precondition,
    /// A filesystem operation failed mid-run.
    Io,
    Internal,
}

/// Convenient result type alias.
pub type IdpResult<T> = Result<T, IdpError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn display_is_transparent() {
        let err: IdpError = ApplicationError::TargetNotDirectory {
            path: PathBuf::from("/x"),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Target path exists and is not a directory: /x"
        );
    }

    #[test]
    fn categories_follow_inner_error() {
        let name: IdpError = crate::domain::validate_service_name("Bad").unwrap_err().into();
        assert_eq!(name.category(), ErrorCategory::Validation);
        assert!(name.is_invalid_name());

        let io: IdpError = ApplicationError::FilesystemError {
            path: PathBuf::from("/x"),
            reason: "gone".into(),
        }
        .into();
        assert_eq!(io.category(), ErrorCategory::Io);
    }
}
