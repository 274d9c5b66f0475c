//! Infrastructure adapters for idp-lite.
//!
//! This crate implements the ports defined in `idp_core::application::ports`
//! and ships the service template payload under `templates/service/`.

pub mod builtin_template;
pub mod filesystem;

// Re-export commonly used adapters
pub use builtin_template::{bundled_template_root, resolve_template_root};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
