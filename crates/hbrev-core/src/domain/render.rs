//! Values that flow through the render step.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;

/// Parsed JSON document handed to the template. Any top-level JSON type.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderData(Value);

impl RenderData {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl FromStr for RenderData {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map(Self)
    }
}

/// Opaque handle to a template compiled inside an engine.
///
/// Only meaningful to the engine that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    key: String,
    origin: PathBuf,
}

impl CompiledTemplate {
    pub fn new(key: impl Into<String>, origin: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            origin: origin.into(),
        }
    }

    /// Engine-side registration key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// File the template was read from.
    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// Registered partial names, sorted.
    pub partials: Vec<String>,
    pub output: PathBuf,
    pub bytes_written: usize,
}
