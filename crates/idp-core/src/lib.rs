//! idp-core - template materialization engine
//!
//! This crate provides the domain and application layers for the idp-lite
//! service scaffolding tool, following a ports and adapters layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            idp-cli (CLI)                │
//! │     (argument parsing, exit codes)      │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ServiceGenerator)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │             (Filesystem)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     idp-adapters (Infrastructure)       │
//! │  (LocalFilesystem, MemoryFilesystem)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ServiceName, PlaceholderSet, Layout)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use idp_core::application::{GenerateRequest, ServiceGenerator};
//!
//! let generator = ServiceGenerator::new(filesystem, template_root);
//! let report = generator.generate(&GenerateRequest::new("payments-api").out_dir("/tmp/out"))?;
//! println!("Service generated at {}", report.target.display());
//! ```

// Pure rules: names, placeholders, classification, layout
pub mod domain;

// Orchestration and ports
pub mod application;

// Unified error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateRequest, ServiceGenerator, TargetPolicy,
        ports::{DirEntryInfo, Filesystem, NodeType, PathState},
    };
    pub use crate::domain::{
        GenerationReport, Operation, PlaceholderSet, PlannedEntry, RelocationRule, ServiceName,
        TemplateLayout, validate_service_name,
    };
    pub use crate::error::{IdpError, IdpResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
