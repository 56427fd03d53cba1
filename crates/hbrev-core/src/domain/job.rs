use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

/// Partials directory used when none is given.
pub const DEFAULT_PARTIALS_DIR: &str = "partials";

/// The four resolved paths of one render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    main: PathBuf,
    partials_dir: PathBuf,
    data: PathBuf,
    output: PathBuf,
}

impl RenderJob {
    pub fn builder() -> RenderJobBuilder {
        RenderJobBuilder::default()
    }

    /// Main template file.
    pub fn main(&self) -> &Path {
        &self.main
    }

    pub fn partials_dir(&self) -> &Path {
        &self.partials_dir
    }

    /// JSON data file.
    pub fn data(&self) -> &Path {
        &self.data
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

/// Builder for [`RenderJob`].
///
/// `main`, `data` and `output` are required; `partials_dir` falls back to
/// [`DEFAULT_PARTIALS_DIR`].
#[derive(Debug, Clone, Default)]
pub struct RenderJobBuilder {
    main: Option<PathBuf>,
    partials_dir: Option<PathBuf>,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl RenderJobBuilder {
    pub fn main(mut self, path: impl Into<PathBuf>) -> Self {
        self.main = Some(path.into());
        self
    }

    pub fn partials_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.partials_dir = Some(path.into());
        self
    }

    pub fn data(mut self, path: impl Into<PathBuf>) -> Self {
        self.data = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Names of every required field still unset, in declaration order.
    ///
    /// Empty paths count as unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("main", &self.main),
            ("data", &self.data),
            ("output", &self.output),
        ]
        .into_iter()
        .filter(|(_, value)| is_unset(value))
        .map(|(field, _)| field)
        .collect()
    }

    pub fn build(self) -> Result<RenderJob, DomainError> {
        Ok(RenderJob {
            main: required(self.main, "main")?,
            partials_dir: self
                .partials_dir
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PARTIALS_DIR)),
            data: required(self.data, "data")?,
            output: required(self.output, "output")?,
        })
    }
}

fn required(value: Option<PathBuf>, field: &'static str) -> Result<PathBuf, DomainError> {
    value
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or(DomainError::MissingRequiredField { field })
}

fn is_unset(value: &Option<PathBuf>) -> bool {
    value.as_ref().is_none_or(|p| p.as_os_str().is_empty())
}
