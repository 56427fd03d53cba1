//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text.  No business logic lives here.
//!
//! The four path options are deliberately optional at the clap level: a
//! missing one is reported by the render command as a warning, followed by
//! the help text.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "handlebars-rev",
    bin_name = "handlebars-rev",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render a handlebars template with partials and JSON data",
    long_about = "handlebars-rev renders one main template against a JSON data \
                  file, with every file under the partials directory available \
                  as a partial, and writes the result to a single output file.",
    after_help = "EXAMPLES:\n\
        \x20 handlebars-rev -m src/index.hbs -d src/data.json -o sheet.html\n\
        \x20 handlebars-rev -m index.hbs -p src/partials -d data.json -o out.html --strict\n\
        \x20 handlebars-rev -c hbrev.toml -m index.hbs -d data.json -o out.html",
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub render: RenderArgs,
}

// ── render ────────────────────────────────────────────────────────────────────

/// What to render and how.
#[derive(Debug, Default, Args)]
pub struct RenderArgs {
    /// Main template file.
    #[arg(
        short = 'm',
        long = "main",
        value_name = "FILE",
        help = "Main template file (required)"
    )]
    pub main: Option<PathBuf>,

    /// Directory whose files are registered as partials.
    #[arg(
        short = 'p',
        long = "partials",
        value_name = "DIR",
        help = "Partials directory [default: partials]"
    )]
    pub partials: Option<PathBuf>,

    /// JSON data file.
    #[arg(
        short = 'd',
        long = "data",
        value_name = "FILE",
        help = "JSON data file (required)"
    )]
    pub data: Option<PathBuf>,

    /// Output file, created or truncated.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file (required)"
    )]
    pub output: Option<PathBuf>,

    /// Fail on references to missing values.
    #[arg(long = "strict", help = "Treat missing values as errors")]
    pub strict: bool,

    /// Emit `{{ }}` output without HTML escaping.
    #[arg(long = "no-escape", help = "Disable HTML escaping")]
    pub no_escape: bool,
}

// ── tests ─────────────────────────────────────────────────────────────────────
