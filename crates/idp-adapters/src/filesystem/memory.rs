//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    io,
    path::{Component, Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use idp_core::{
    application::{
        ApplicationError,
        ports::{DirEntryInfo, Filesystem, NodeType, PathState},
    },
    error::IdpResult,
};

/// Working directory used to resolve relative paths.
pub const MEMORY_CWD: &str = "/work";

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem for testing.
///
/// Paths are normalized lexically, relative paths resolve against
/// [`MEMORY_CWD`]. Writes below a path registered with
/// [`deny_writes`](Self::deny_writes) fail with `PermissionDenied`.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    nodes: BTreeMap<PathBuf, Node>,
    denied: HashSet<PathBuf>,
    writes: usize,
}

impl MemoryFilesystem {
    /// Create a new filesystem containing only `/` and [`MEMORY_CWD`].
    pub fn new() -> Self {
        let fs = Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        };
        fs.insert_dirs(Path::new(MEMORY_CWD));
        fs
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Self {
        let path = normalize(path.as_ref());
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.write_inner()
            .nodes
            .insert(path, Node::File(content.as_ref().to_vec()));
        self
    }

    /// Seed an (empty) directory.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert_dirs(&normalize(path.as_ref()));
        self
    }

    /// Make every write at or below `path` fail.
    pub fn deny_writes(&self, path: impl AsRef<Path>) {
        self.write_inner().denied.insert(normalize(path.as_ref()));
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.read_inner().nodes.get(&normalize(path.as_ref())) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Read a file as UTF-8 text (testing helper).
    pub fn read_text(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read_file(path)
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(
            self.read_inner().nodes.get(&normalize(path.as_ref())),
            Some(Node::Dir)
        )
    }

    /// All paths (files and directories) at or below `root`, sorted.
    pub fn paths_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = normalize(root.as_ref());
        self.read_inner()
            .nodes
            .keys()
            .filter(|p| p.starts_with(&root) && **p != root)
            .cloned()
            .collect()
    }

    /// Number of mutating calls performed so far.
    pub fn write_count(&self) -> usize {
        self.read_inner().writes
    }

    fn insert_dirs(&self, path: &Path) {
        let mut inner = self.write_inner();
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.nodes.entry(current.clone()).or_insert(Node::Dir);
        }
    }

    fn read_inner(&self) -> std::sync::RwLockReadGuard<'_, MemoryFilesystemInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_inner(&self) -> std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryFilesystemInner {
    fn check_writable(&self, path: &Path) -> IdpResult<()> {
        if self.denied.iter().any(|d| path.starts_with(d)) {
            return Err(fail(path, io::ErrorKind::PermissionDenied, "write"));
        }
        Ok(())
    }

    fn has_children(&self, path: &Path) -> bool {
        self.nodes.keys().any(|p| p.parent() == Some(path))
    }
}

impl Filesystem for MemoryFilesystem {
    fn absolute(&self, path: &Path) -> IdpResult<PathBuf> {
        Ok(normalize(path))
    }

    fn probe(&self, path: &Path) -> IdpResult<PathState> {
        let path = normalize(path);
        let inner = self.read_inner();
        Ok(match inner.nodes.get(&path) {
            None => PathState::Missing,
            Some(Node::File(_)) => PathState::File,
            Some(Node::Dir) => PathState::Directory {
                empty: !inner.has_children(&path),
            },
        })
    }

    fn create_dir_all(&self, path: &Path) -> IdpResult<()> {
        let path = normalize(path);
        let mut inner = self.write_inner();
        inner.check_writable(&path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            match inner.nodes.get(&current) {
                Some(Node::File(_)) => {
                    return Err(fail(&current, io::ErrorKind::AlreadyExists, "create directory"));
                }
                Some(Node::Dir) => {}
                None => {
                    inner.nodes.insert(current.clone(), Node::Dir);
                }
            }
        }

        inner.writes += 1;
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> IdpResult<Vec<DirEntryInfo>> {
        let path = normalize(path);
        let inner = self.read_inner();

        match inner.nodes.get(&path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => return Err(fail(&path, io::ErrorKind::NotADirectory, "read directory")),
            None => return Err(fail(&path, io::ErrorKind::NotFound, "read directory")),
        }

        // BTreeMap order is component-wise, so siblings come out sorted by name.
        Ok(inner
            .nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path.as_path()))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_str()?.to_owned();
                let node_type = match node {
                    Node::Dir => NodeType::Directory,
                    Node::File(_) => NodeType::File,
                };
                Some(DirEntryInfo { name, node_type })
            })
            .collect())
    }

    fn read(&self, path: &Path) -> IdpResult<Vec<u8>> {
        let path = normalize(path);
        match self.read_inner().nodes.get(&path) {
            Some(Node::File(content)) => Ok(content.clone()),
            Some(Node::Dir) => Err(fail(&path, io::ErrorKind::IsADirectory, "read file")),
            None => Err(fail(&path, io::ErrorKind::NotFound, "read file")),
        }
    }

    fn write(&self, path: &Path, content: &[u8]) -> IdpResult<()> {
        let path = normalize(path);
        let mut inner = self.write_inner();
        inner.check_writable(&path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !matches!(inner.nodes.get(parent), Some(Node::Dir)) {
                return Err(ApplicationError::FilesystemError {
                    path: path.clone(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }
        if matches!(inner.nodes.get(&path), Some(Node::Dir)) {
            return Err(fail(&path, io::ErrorKind::IsADirectory, "write file"));
        }

        inner.nodes.insert(path, Node::File(content.to_vec()));
        inner.writes += 1;
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> IdpResult<()> {
        let content = self.read(from)?;
        self.write(to, &content)
    }
}

/// Lexically resolve `path` against [`MEMORY_CWD`].
fn normalize(path: &Path) -> PathBuf {
    let mut out = if path.is_absolute() {
        PathBuf::new()
    } else {
        PathBuf::from(MEMORY_CWD)
    };
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

fn fail(path: &Path, kind: io::ErrorKind, operation: &str) -> idp_core::error::IdpError {
    ApplicationError::io(path, operation, io::Error::from(kind)).into()
}
