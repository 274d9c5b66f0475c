// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for idp-lite.
//!
//! Pure rules with no I/O: what a valid service name is, how placeholders
//! expand, how files are classified, and which template entries are
//! excluded or relocated. Filesystem access lives behind the ports in
//! `crate::application`.
//!
//! ## Rules
//!
//! - **No I/O**: everything here takes bytes and paths as values
//! - **Immutable values**: `ServiceName` and `PlaceholderSet` are built once per run
//! - **Declarative layout**: exclusions and relocations are data, not branches
//!
pub mod classify;
pub mod entry;
pub mod error;
pub mod layout;
pub mod placeholders;
pub mod service_name;

// Re-exports for convenience
pub use classify::{BINARY_EXTENSIONS, FileClass, SNIFF_LEN, classify, has_binary_extension};
pub use entry::{EntryKind, GenerationReport, Operation, PlannedEntry, TemplateEntry};
pub use error::{DomainError, ErrorCategory};
pub use layout::{EXCLUDED_DIRS, RelativePath, RelocationRule, TemplateLayout};
pub use placeholders::{
    GENERATED_DATE_ISO_TOKEN, Placeholder, PlaceholderSet, SERVICE_NAME_PASCAL_TOKEN,
    SERVICE_NAME_TOKEN, normalize_newlines,
};
pub use service_name::{EXPECTED_GRAMMAR, ServiceName, pascal_case, validate_service_name};
