// ============================================================================
// domain/error.rs - VALIDATION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Domain errors never involve the filesystem: they are raised before any
/// I/O happens and are always the caller's to fix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid service name '{name}'. Use {expected}.")]
    InvalidServiceName { name: String, expected: &'static str },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the template root: {path}")]
    PathEscapesRoot { path: String },

    #[error("Relocation rule has an empty {field} path")]
    EmptyRelocation { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidServiceName { name, .. } => {
                let mut hints = vec![format!("'{name}' is not a valid service name")];
                let lowered = name.to_ascii_lowercase().replace('_', "-");
                if lowered != *name && crate::domain::service_name::is_valid(&lowered) {
                    hints.push(format!("Did you mean '{lowered}'?"));
                }
                hints.push("Examples: payments-api, orders, ledger-v2".into());
                hints
            }
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("Template paths must stay inside the template root: {path}"),
                "Use a path relative to the template root".into(),
            ],
            Self::EmptyRelocation { .. } => {
                vec!["Relocation rules need both a source and a destination".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidServiceName { .. } => ErrorCategory::Validation,
            Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::EmptyRelocation { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_name_message_carries_grammar() {
        let err = DomainError::InvalidServiceName {
            name: "Bad_Name".into(),
            expected: "kebab-case",
        };
        assert_eq!(err.to_string(), "Invalid service name 'Bad_Name'. Use kebab-case.");
    }

    #[test]
    fn invalid_name_suggests_kebab_case_fix() {
        let err = DomainError::InvalidServiceName {
            name: "Payments_Api".into(),
            expected: "kebab-case",
        };
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("'payments-api'"))
        );
    }

    #[test]
    fn invalid_name_is_validation_category() {
        let err = DomainError::InvalidServiceName {
            name: String::new(),
            expected: "kebab-case",
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
