//! Status output.
//!
//! Success lines go to stdout; warnings and errors go to stderr so a
//! redirected stdout never swallows them.

use std::io::{self, IsTerminal};
use std::path::Path;

use console::Term;
use owo_colors::OwoColorize;
use tracing::debug;

use hbrev_core::application::RenderObserver;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
#[derive(Clone)]
pub struct OutputManager {
    quiet: bool,
    color: bool,
    out: Term,
    err: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = resolve_format(args.output_format, io::stdout().is_terminal());

        Self {
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        } else {
            format!("\u{2713} {msg}")
        };
        self.out.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`, on stderr.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        } else {
            format!("\u{26a0} {msg}")
        };
        self.err.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        } else {
            format!("\u{2139} {msg}")
        };
        self.out.write_line(&line)
    }
}

/// Partial discovery is reported as soon as the directory has been read, so
/// the empty-folder warning shows up even when the render fails later.
impl RenderObserver for OutputManager {
    fn partials_loaded(&self, dir: &Path, names: &[String]) {
        let written = if names.is_empty() {
            self.warning(&format!(
                "Did not find any files in partials folder '{}'",
                dir.display()
            ))
        } else {
            self.info(&format!(
                "Found {} partial(s): {}",
                names.len(),
                names.join(", ")
            ))
        };
        if let Err(e) = written {
            debug!(error = %e, "Failed to write status line");
        }
    }
}

/// Resolve `Auto` to `Human` on a terminal and `Plain` otherwise.
fn resolve_format(requested: OutputFormat, is_terminal: bool) -> OutputFormat {
    match requested {
        OutputFormat::Auto if is_terminal => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        explicit => explicit,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
