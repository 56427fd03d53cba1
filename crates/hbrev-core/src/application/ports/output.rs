//! Driven (output) ports - implemented by infrastructure.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{CompiledTemplate, Partial, RenderData};
use crate::error::HbrevResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hbrev_adapters::filesystem::LocalFilesystem` (production)
/// - `hbrev_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Every regular file below `dir`, recursively, skipping hidden entries.
    ///
    /// Fails if `dir` cannot be enumerated.
    async fn list_files(&self, dir: &Path) -> HbrevResult<Vec<PathBuf>>;

    /// Read a whole file as UTF-8.
    async fn read_to_string(&self, path: &Path) -> HbrevResult<String>;

    /// Create or truncate `path` and write `content`.
    async fn write_file(&self, path: &Path, content: &str) -> HbrevResult<()>;
}

/// Port for the template engine.
///
/// One instance per run. The engine owns its partial and helper registry;
/// nothing is shared between instances.
///
/// Implemented by:
/// - `hbrev_adapters::engine::HandlebarsEngine`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send {
    /// Register (or replace) a partial under its name.
    fn register_partial(&mut self, partial: &Partial) -> HbrevResult<()>;

    /// Compile the main template. `origin` is only used in error messages.
    fn compile(&mut self, origin: &Path, source: &str) -> HbrevResult<CompiledTemplate>;

    /// Evaluate a compiled template against the data.
    fn render(&self, template: &CompiledTemplate, data: &RenderData) -> HbrevResult<String>;
}

/// Port for progress notices raised while the pipeline runs.
///
/// Implemented by:
/// - the CLI's `OutputManager`
#[cfg_attr(test, mockall::automock)]
pub trait RenderObserver: Send + Sync {
    /// The partials directory has been enumerated and read. Runs before
    /// anything is compiled; `names` is empty when the directory held no files.
    fn partials_loaded(&self, dir: &Path, names: &[String]);
}
