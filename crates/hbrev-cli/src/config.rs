//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. TOML file passed with `--config`
//! 3. Built-in defaults (always present)
//!
//! ```toml
//! [render]
//! partials_dir = "src/partials"
//! strict = true
//! escape_html = false
//!
//! [output]
//! no_color = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use hbrev_core::domain::DEFAULT_PARTIALS_DIR;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Render defaults.
    pub render: RenderConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Used when `--partials` is not given.
    pub partials_dir: PathBuf,
    pub strict: bool,
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            partials_dir: PathBuf::from(DEFAULT_PARTIALS_DIR),
            strict: false,
            escape_html: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: built-in defaults, overlaid by `config_file` when
    /// one is given.  A given file must exist and parse.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("Invalid built-in defaults")?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder
            .build()
            .and_then(|config| config.try_deserialize())
            .with_context(|| match config_file {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_owned(),
            })
    }
}
