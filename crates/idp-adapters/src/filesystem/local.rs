//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use idp_core::{
    application::{
        ApplicationError,
        ports::{DirEntryInfo, Filesystem, NodeType, PathState},
    },
    error::IdpResult,
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    /// Absolute and lexically normalized: `.` is dropped and `..` pops the
    /// previous component. Symlinks are not resolved.
    fn absolute(&self, path: &Path) -> IdpResult<PathBuf> {
        let resolved =
            std::path::absolute(path).map_err(|e| map_io_error(path, e, "resolve path"))?;
        Ok(lexically_normalize(&resolved))
    }

    fn probe(&self, path: &Path) -> IdpResult<PathState> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PathState::Missing),
            Err(e) => return Err(map_io_error(path, e, "inspect path")),
        };

        if !metadata.is_dir() {
            return Ok(PathState::File);
        }

        let mut entries = fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(PathState::Directory {
            empty: entries.next().is_none(),
        })
    }

    fn create_dir_all(&self, path: &Path) -> IdpResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn list_dir(&self, path: &Path) -> IdpResult<Vec<DirEntryInfo>> {
        let mut listed = Vec::new();

        // Symlinks are not followed and come back as `NodeType::Other`.
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let at = e.path().unwrap_or(path).to_path_buf();
                map_io_error(&at, e.into(), "read directory")
            })?;

            let name = entry.file_name().to_str().ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: entry.path().to_path_buf(),
                    reason: "file name is not valid UTF-8".into(),
                }
            })?;

            let file_type = entry.file_type();
            let node_type = if file_type.is_dir() {
                NodeType::Directory
            } else if file_type.is_file() {
                NodeType::File
            } else {
                NodeType::Other
            };

            listed.push(DirEntryInfo {
                name: name.to_owned(),
                node_type,
            });
        }

        Ok(listed)
    }

    fn read(&self, path: &Path) -> IdpResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write(&self, path: &Path, content: &[u8]) -> IdpResult<()> {
        fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> IdpResult<()> {
        fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }
}

fn lexically_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping past the root is a no-op, as with `..` at `/`.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> idp_core::error::IdpError {
    ApplicationError::io(path, operation, e).into()
}
