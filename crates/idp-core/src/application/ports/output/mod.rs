//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `idp-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::error::IdpResult;

/// What currently sits at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// Nothing there (the only "not found" that is not an error).
    Missing,
    /// A file, symlink to a file, or any other non-directory node.
    File,
    Directory { empty: bool },
}

/// Type of a listed directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Directory,
    File,
    /// Sockets, fifos, dangling links and the like.
    Other,
}

/// One entry returned by [`Filesystem::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub node_type: NodeType,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `idp_adapters::filesystem::LocalFilesystem` (production)
/// - `idp_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Every failure is reported as `ApplicationError::FilesystemError` carrying
/// the offending path.
pub trait Filesystem: Send + Sync {
    /// Resolve `path` against the current working directory.
    fn absolute(&self, path: &Path) -> IdpResult<PathBuf>;

    /// Inspect `path` without modifying anything.
    fn probe(&self, path: &Path) -> IdpResult<PathState>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> IdpResult<()>;

    /// List a directory, sorted by name (byte-wise, case-sensitive).
    fn list_dir(&self, path: &Path) -> IdpResult<Vec<DirEntryInfo>>;

    /// Read a whole file.
    fn read(&self, path: &Path) -> IdpResult<Vec<u8>>;

    /// Write content to a file, replacing it if present.
    fn write(&self, path: &Path, content: &[u8]) -> IdpResult<()>;

    /// Copy a file byte for byte.
    fn copy_file(&self, from: &Path, to: &Path) -> IdpResult<()>;
}
