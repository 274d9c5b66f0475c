//! Application layer for idp-lite.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`ServiceGenerator`)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer sequences the domain rules and performs all I/O
//! through ports. The rules themselves live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{GenerateRequest, ServiceGenerator, TargetPolicy};

// Re-export port traits (for adapter implementation)
pub use ports::{DirEntryInfo, Filesystem, NodeType, PathState};

pub use error::ApplicationError;
