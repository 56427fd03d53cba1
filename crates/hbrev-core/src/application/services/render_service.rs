//! Render Service - main application orchestrator.
//!
//! This service runs the whole pipeline:
//! 1. Load partials, read the main template, load the data (concurrently)
//! 2. Register every partial with the engine
//! 3. Compile the main template
//! 4. Render it against the data
//! 5. Write the output file
//!
//! Any failure ends the run; nothing is written unless rendering succeeded.

use std::path::Path;

use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, RenderObserver, TemplateEngine},
    },
    domain::{Partial, PartialRegistry, RenderData, RenderJob, RenderReport},
    error::{HbrevError, HbrevResult},
};

/// Main render service.
///
/// Owns the engine for the duration of a run, so partial registration never
/// leaks between runs.
pub struct RenderService {
    filesystem: Box<dyn Filesystem>,
    engine: Box<dyn TemplateEngine>,
    observer: Option<Box<dyn RenderObserver>>,
}

impl RenderService {
    /// Create a new render service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, engine: Box<dyn TemplateEngine>) -> Self {
        Self {
            filesystem,
            engine,
            observer: None,
        }
    }

    /// Report progress to `observer` while rendering.
    pub fn with_observer(mut self, observer: Box<dyn RenderObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Render `job.main()` with `job.data()` into `job.output()`.
    #[instrument(
        skip_all,
        fields(
            main = %job.main().display(),
            partials = %job.partials_dir().display(),
            output = %job.output().display()
        )
    )]
    pub async fn render(&mut self, job: &RenderJob) -> HbrevResult<RenderReport> {
        // 1. All reads in flight at once; single join point.
        let (registry, source, data) = futures::try_join!(
            self.load_partials(job.partials_dir()),
            self.read_template(job.main()),
            self.load_data(job.data()),
        )?;

        // 2. Every partial is registered before anything is rendered.
        for partial in registry.iter() {
            self.engine.register_partial(partial)?;
        }
        debug!(count = registry.len(), "Partials registered");

        // 3. Compile
        let template = self.engine.compile(job.main(), &source)?;

        // 4. Render
        let rendered = self.engine.render(&template, &data)?;

        // 5. Write
        self.filesystem.write_file(job.output(), &rendered).await?;
        info!(bytes = rendered.len(), "Output written");

        Ok(RenderReport {
            partials: registry.names(),
            output: job.output().to_path_buf(),
            bytes_written: rendered.len(),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Enumerate and read every fragment under `dir`.
    async fn load_partials(&self, dir: &Path) -> HbrevResult<PartialRegistry> {
        let files = self.filesystem.list_files(dir).await?;
        if files.is_empty() {
            debug!(dir = %dir.display(), "No partial files found");
        }

        let reads = files.into_iter().map(|path| async move {
            let source = self.filesystem.read_to_string(&path).await?;
            Partial::from_file(path, source).map_err(HbrevError::from)
        });

        // Registry iteration is name-ordered, so a later file with the same
        // name replaces an earlier one here, before registration.
        let registry: PartialRegistry = try_join_all(reads).await?.into_iter().collect();
        debug!(count = registry.len(), "Partials loaded");

        if let Some(observer) = &self.observer {
            observer.partials_loaded(dir, &registry.names());
        }
        Ok(registry)
    }

    async fn read_template(&self, path: &Path) -> HbrevResult<String> {
        let source = self.filesystem.read_to_string(path).await?;
        debug!(path = %path.display(), bytes = source.len(), "Main template read");
        Ok(source)
    }

    async fn load_data(&self, path: &Path) -> HbrevResult<RenderData> {
        let text = self.filesystem.read_to_string(path).await?;
        let data = text
            .parse::<RenderData>()
            .map_err(|e| ApplicationError::DataParse {
                path: path.to_path_buf(),
                line: e.line(),
                column: e.column(),
                reason: e.to_string(),
            })?;
        debug!(path = %path.display(), "Data parsed");
        Ok(data)
    }
}
