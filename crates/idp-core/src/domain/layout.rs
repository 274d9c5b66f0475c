//! Declarative rules describing how a template tree maps onto the output.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::DomainError;

/// Directory names never copied into generated output, compared against the
/// lower-cased entry name.
pub const EXCLUDED_DIRS: [&str; 6] = [".git", ".idea", ".vscode", "coverage", "dist", "node_modules"];

/// A filesystem path guaranteed to be relative and to stay below its root.
///
/// Invariant: never absolute, never contains `..`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::PathEscapesRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// First normal component, e.g. `ci` for `ci/ci.yml`.
    pub fn first_component(&self) -> Option<&str> {
        self.0.components().find_map(|c| match c {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.first_component().is_none()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Copy one template file to a different location in the output.
///
/// The top-level template entry containing `source` is excluded from the
/// generic walk; the file itself is rendered as text and written to
/// `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRule {
    source: RelativePath,
    destination: RelativePath,
}

impl RelocationRule {
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, DomainError> {
        let source = RelativePath::try_new(source)?;
        let destination = RelativePath::try_new(destination)?;
        if source.is_empty() {
            return Err(DomainError::EmptyRelocation { field: "source" });
        }
        if destination.is_empty() {
            return Err(DomainError::EmptyRelocation {
                field: "destination",
            });
        }
        Ok(Self {
            source,
            destination,
        })
    }

    pub fn source(&self) -> &RelativePath {
        &self.source
    }

    pub fn destination(&self) -> &RelativePath {
        &self.destination
    }

    /// Name of the template-root entry this rule reserves.
    pub fn reserved_root_entry(&self) -> Option<&str> {
        self.source.first_component()
    }
}

/// Exclusions and relocations applied while materializing a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    excluded_dirs: Vec<String>,
    relocations: Vec<RelocationRule>,
}

impl TemplateLayout {
    /// Layout with the given rules and the standard directory exclusions.
    pub fn new(relocations: Vec<RelocationRule>) -> Self {
        Self {
            excluded_dirs: EXCLUDED_DIRS.iter().map(|d| (*d).to_owned()).collect(),
            relocations,
        }
    }

    /// The golden-path service layout: `ci/ci.yml` becomes
    /// `.github/workflows/ci.yml`.
    pub fn service() -> Self {
        let ci = RelocationRule {
            source: RelativePath(PathBuf::from("ci").join("ci.yml")),
            destination: RelativePath(PathBuf::from(".github").join("workflows").join("ci.yml")),
        };
        Self::new(vec![ci])
    }

    pub fn relocations(&self) -> &[RelocationRule] {
        &self.relocations
    }

    /// Whether a directory named `name` is a template-authoring artifact.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.excluded_dirs.iter().any(|d| *d == lowered)
    }

    /// Whether a template-root entry is owned by a relocation rule.
    ///
    /// Only meaningful at depth 0; deeper entries with the same name are
    /// copied normally.
    pub fn is_reserved_root_entry(&self, name: &str) -> bool {
        self.relocations
            .iter()
            .any(|rule| rule.reserved_root_entry() == Some(name))
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self::service()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn relative_path_rejects_parent_components() {
        assert!(matches!(
            RelativePath::try_new("ci/../../x"),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn first_component_skips_cur_dir() {
        let path = RelativePath::try_new("./ci/ci.yml").unwrap();
        assert_eq!(path.first_component(), Some("ci"));
    }

    #[test]
    fn service_layout_reserves_ci() {
        let layout = TemplateLayout::service();
        assert!(layout.is_reserved_root_entry("ci"));
        assert!(!layout.is_reserved_root_entry("src"));
        let rule = &layout.relocations()[0];
        assert_eq!(rule.source().as_path(), Path::new("ci/ci.yml"));
        assert_eq!(
            rule.destination().as_path(),
            Path::new(".github/workflows/ci.yml")
        );
    }

    #[test]
    fn exclusions_ignore_case() {
        let layout = TemplateLayout::service();
        for name in ["node_modules", "Node_Modules", ".GIT", "dist", "Coverage", ".vscode", ".idea"] {
            assert!(layout.is_excluded_dir(name), "{name}");
        }
        assert!(!layout.is_excluded_dir("src"));
        assert!(!layout.is_excluded_dir("distribution"));
    }

    #[test]
    fn relocation_rule_requires_both_paths() {
        assert!(matches!(
            RelocationRule::new("", "out.yml"),
            Err(DomainError::EmptyRelocation { field: "source" })
        ));
        assert!(matches!(
            RelocationRule::new("ci/ci.yml", "."),
            Err(DomainError::EmptyRelocation {
                field: "destination"
            })
        ));
    }

    #[test]
    fn custom_rules_drive_reserved_entries() {
        let rule = RelocationRule::new("docker/Dockerfile", "Dockerfile").unwrap();
        let layout = TemplateLayout::new(vec![rule]);
        assert!(layout.is_reserved_root_entry("docker"));
        assert!(!layout.is_reserved_root_entry("ci"));
    }
}
