//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    io,
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;

use hbrev_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HbrevError, HbrevResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same underlying state, so a test can keep a handle after
/// boxing one into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories (builder style).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert_file(path, content);
        self
    }

    /// Add an empty directory (builder style).
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_all(&path.into());
        }
        self
    }

    /// Add a file, creating its parent directories.
    pub fn insert_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path, content.into());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// Check whether a file exists.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path.as_ref()))
            .unwrap_or(false)
    }

    fn read_guard(&self) -> HbrevResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write_guard(&self) -> HbrevResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

#[async_trait]
impl Filesystem for MemoryFilesystem {
    async fn list_files(&self, dir: &Path) -> HbrevResult<Vec<PathBuf>> {
        let inner = self.read_guard()?;

        // A regular file is walked but never listed, as on disk.
        if inner.files.contains_key(dir) {
            return Ok(Vec::new());
        }
        if !inner.directories.contains(dir) {
            return Err(not_found(dir, "list directory"));
        }

        Ok(inner
            .files
            .keys()
            .filter(|path| path.starts_with(dir) && !has_hidden_component(path, dir))
            .cloned()
            .collect())
    }

    async fn read_to_string(&self, path: &Path) -> HbrevResult<String> {
        self.read_guard()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "read file"))
    }

    async fn write_file(&self, path: &Path, content: &str) -> HbrevResult<()> {
        let mut inner = self.write_guard()?;

        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.directories.contains(p));
        if parent_missing {
            return Err(not_found(path, "write file"));
        }

        inner.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }
}

/// Any component below `root` whose name starts with `.`.
fn has_hidden_component(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .map(|relative| {
            relative.components().any(|c| match c {
                Component::Normal(name) => name.to_str().is_some_and(|n| n.starts_with('.')),
                _ => false,
            })
        })
        .unwrap_or(false)
}

fn not_found(path: &Path, operation: &'static str) -> HbrevError {
    ApplicationError::filesystem(path, operation, &io::Error::from(io::ErrorKind::NotFound))
        .into()
}

fn poisoned() -> HbrevError {
    HbrevError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
