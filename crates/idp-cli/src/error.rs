//! CLI-level errors, their exit codes and how they are reported on stderr.
//!
//! A failure is always reported as one `Error: <message>` line. With `-v`
//! the cause chain and suggestions follow it.

use std::error::Error as _;
use std::path::Path;

use owo_colors::OwoColorize;
use thiserror::Error;

use idp_core::error::{ErrorCategory as CoreCategory, IdpError};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Generation failures; the core message is shown as-is.
    #[error(transparent)]
    Core(#[from] IdpError),

    /// The config file or environment could not be loaded or serialized.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unknown config key: '{key}'")]
    UnknownConfigKey { key: String },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render JSON output")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

/// Broad classes of failure, one exit code each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad service name or unusable target directory.
    UserError,
    NotFound,
    Configuration,
    /// Filesystem and other system failures.
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Internal => 1,
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
        }
    }
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Precondition => ErrorCategory::UserError,
                CoreCategory::Io | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownConfigKey { .. } => ErrorCategory::NotFound,
            Self::IoError { .. } | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Hints printed under `Suggestions:` with `-v`.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::ConfigError { .. } => vec![
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'idp-lite init --force' to write a fresh default config".into(),
                "Environment overrides use the IDP_LITE__ prefix, e.g. IDP_LITE__TEMPLATES__ROOT"
                    .into(),
            ],
            Self::UnknownConfigKey { .. } => vec![
                "Known keys: templates.root, output.no_color, output.format".into(),
                "Use 'idp-lite config list' to see all values".into(),
            ],
            Self::IoError { .. } => vec![
                "Check that the directory is writable".into(),
                "Pass --config to use a different location".into(),
            ],
            Self::Json(_) => vec!["Retry with --output-format plain".into()],
        }
    }

    /// The stderr report, newline-terminated.
    pub fn render(&self, verbose: bool, colour: bool) -> String {
        let paint = |text: String, style: fn(&str) -> String| {
            if colour { style(&text) } else { text }
        };

        let mut report = format!(
            "{} {}\n",
            paint("Error:".into(), |t| t.red().bold().to_string()),
            paint(self.to_string(), |t| t.red().to_string()),
        );
        if !verbose {
            return report;
        }

        let mut cause = self.source();
        while let Some(err) = cause {
            report += &paint(format!("  Caused by: {err}"), |t| t.dimmed().to_string());
            report.push('\n');
            cause = err.source();
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            report += &paint("Suggestions:".into(), |t| t.yellow().bold().to_string());
            report.push('\n');
            for hint in suggestions {
                report += &format!("  {hint}\n");
            }
        }
        report
    }

    /// Trace the failure below the default `warn` level; the stderr report
    /// is what the user sees.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::debug!(exit_code = self.exit_code(), "{}", self);
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::info!(exit_code = self.exit_code(), "{}", self);
            }
        }
    }
}

/// Attach the path being worked on to a failed filesystem call.
pub trait IoContext<T> {
    fn at_path(self, action: &str, path: &Path) -> CliResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, action: &str, path: &Path) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: format!("Failed to {action} '{}'", path.display()),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    use idp_core::{application::ApplicationError, domain::ServiceName};

    fn invalid_name() -> CliError {
        CliError::Core(ServiceName::parse("Bad_Name").unwrap_err().into())
    }

    #[test]
    fn exit_codes_by_failure() {
        let not_empty = CliError::Core(
            ApplicationError::TargetNotEmpty {
                path: PathBuf::from("/srv/orders"),
            }
            .into(),
        );
        let denied = CliError::Core(
            ApplicationError::io(
                Path::new("/srv/orders/src"),
                "write file",
                io::Error::from(io::ErrorKind::PermissionDenied),
            )
            .into(),
        );
        let unknown = CliError::UnknownConfigKey {
            key: "templates.nope".into(),
        };
        let config = CliError::ConfigError {
            message: "bad toml".into(),
            source: None,
        };

        assert_eq!(invalid_name().exit_code(), 2);
        assert_eq!(not_empty.exit_code(), 2);
        assert_eq!(denied.exit_code(), 1);
        assert_eq!(unknown.exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
    }

    #[test]
    fn default_report_is_one_line() {
        assert_eq!(
            invalid_name().render(false, false),
            "Error: Invalid service name 'Bad_Name'. Use kebab-case with lowercase letters, \
             numbers, and hyphens (e.g. payments-api).\n"
        );
    }

    #[test]
    fn verbose_report_lists_suggestions() {
        let report = invalid_name().render(true, false);
        assert!(report.starts_with("Error: Invalid service name"));
        assert!(report.contains("Suggestions:\n"));
        assert!(report.contains("bad-name"));
    }

    #[test]
    fn verbose_report_walks_causes() {
        let err = io::Result::<()>::Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            .at_path("write config", Path::new("/etc/idp-lite.toml"))
            .unwrap_err();
        let report = err.render(true, false);
        assert!(report.starts_with("Error: I/O error: Failed to write config '/etc/idp-lite.toml'\n"));
        assert!(report.contains("  Caused by: denied\n"));
    }

    #[test]
    fn coloured_report_keeps_message() {
        let report = invalid_name().render(false, true);
        assert!(report.contains("Bad_Name"));
        assert!(report.ends_with('\n'));
    }
}
