//! Local filesystem adapter using `tokio::fs` and `walkdir`.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{instrument, trace};
use walkdir::{DirEntry, WalkDir};

use hbrev_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HbrevError, HbrevResult},
};

/// Production filesystem implementation.
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

#[async_trait]
impl Filesystem for LocalFilesystem {
    #[instrument(skip_all, fields(dir = %dir.display()))]
    async fn list_files(&self, dir: &Path) -> HbrevResult<Vec<PathBuf>> {
        let root = dir.to_path_buf();
        tokio::task::spawn_blocking(move || walk_files(&root))
            .await
            .map_err(|e| HbrevError::Internal {
                message: format!("directory walk task failed: {e}"),
            })?
    }

    async fn read_to_string(&self, path: &Path) -> HbrevResult<String> {
        trace!(path = %path.display(), "Reading file");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(path, &e, "read file"))
    }

    async fn write_file(&self, path: &Path, content: &str) -> HbrevResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "Writing file");
        tokio::fs::write(path, content)
            .await
            .map_err(|e| map_io_error(path, &e, "write file"))
    }
}

/// Regular files below `root`, sorted by name, following symlinks.
///
/// Hidden files and directories are skipped, the way a shell `**` glob
/// skips them. The root itself is always walked and never listed, so a
/// `root` that is a regular file lists nothing.
fn walk_files(root: &Path) -> HbrevResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|e| map_walk_error(root, e))?;
        if entry.depth() > 0 && entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> HbrevError {
    let path = e.path().unwrap_or(root).to_path_buf();
    let io_err = match e.into_io_error() {
        Some(io_err) => io_err,
        // Only symlink loops produce a walkdir error without an io::Error.
        None => io::Error::other("symlink loop detected"),
    };
    map_io_error(&path, &io_err, "list directory")
}

fn map_io_error(path: &Path, e: &io::Error, operation: &'static str) -> HbrevError {
    ApplicationError::filesystem(path, operation, e).into()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use hbrev_core::error::ErrorCategory;
    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[tokio::test]
    async fn lists_files_recursively_and_sorted() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.txt", "b");
        touch(temp.path(), "a.hbs", "a");
        touch(temp.path(), "nested/c.foo.hbs", "c");

        let files = LocalFilesystem::new().list_files(temp.path()).await.unwrap();

        assert_eq!(
            relative_names(temp.path(), &files),
            vec!["a.hbs", "b.txt", "nested/c.foo.hbs"]
        );
    }

    #[tokio::test]
    async fn skips_hidden_entries() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "visible.hbs", "v");
        touch(temp.path(), ".DS_Store", "x");
        touch(temp.path(), ".git/HEAD", "ref");

        let files = LocalFilesystem::new().list_files(temp.path()).await.unwrap();

        assert_eq!(relative_names(temp.path(), &files), vec!["visible.hbs"]);
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let files = LocalFilesystem::new().list_files(temp.path()).await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn regular_file_as_root_lists_nothing() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "partials.hbs", "not a directory");

        let files = LocalFilesystem::new()
            .list_files(&temp.path().join("partials.hbs"))
            .await
            .unwrap();

        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .list_files(&temp.path().join("nope"))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[tokio::test]
    async fn read_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.hbs");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        let err = LocalFilesystem::new().read_to_string(&path).await.unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::InvalidData));
    }

    #[tokio::test]
    async fn write_overwrites_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.html");
        fs::write(&path, "old content that is longer").unwrap();

        LocalFilesystem::new().write_file(&path, "new").await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/out.html");

        let err = LocalFilesystem::new().write_file(&path, "x").await.unwrap_err();
        assert!(err.to_string().contains("write file"));
    }
}
