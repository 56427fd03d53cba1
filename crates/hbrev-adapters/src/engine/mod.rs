//! Handlebars-backed template engine.
//!
//! Each [`HandlebarsEngine`] owns its own `Handlebars` registry. Partials,
//! helpers and the compiled main template live in that registry and nowhere
//! else, so two engines never see each other's registrations.
//!
//! A partial that fails to compile does not fail registration. It is replaced
//! by a stand-in that raises the compile error when the partial is invoked,
//! so an unused broken fragment never stops a render.

mod helpers;
mod repeat;

use std::path::Path;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use tracing::{debug, trace, warn};

use hbrev_core::{
    application::{ApplicationError, ports::TemplateEngine},
    domain::{CompiledTemplate, Partial, RenderData},
    error::HbrevResult,
};

pub use helpers::HELPER_NAMES;
pub use repeat::RepeatHelper;

/// Registry key of the main template.
///
/// Partial names come from file names and can never contain `/`, so this key
/// cannot be shadowed by a partial.
pub const MAIN_TEMPLATE_KEY: &str = "/main";

/// Engine behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlebarsOptions {
    /// Referencing a missing value is a render error.
    pub strict: bool,
    /// HTML-escape `{{ }}` output. `{{{ }}}` is never escaped.
    pub escape_html: bool,
}

impl Default for HandlebarsOptions {
    fn default() -> Self {
        Self {
            strict: false,
            escape_html: true,
        }
    }
}

/// [`TemplateEngine`] implementation on top of the `handlebars` crate.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
    broken_partials: usize,
}

impl HandlebarsEngine {
    /// Build an engine with every helper in [`HELPER_NAMES`] registered.
    pub fn new(options: HandlebarsOptions) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(options.strict);
        if !options.escape_html {
            registry.register_escape_fn(handlebars::no_escape);
        }
        helpers::register_all(&mut registry);

        debug!(
            strict = options.strict,
            escape_html = options.escape_html,
            helpers = HELPER_NAMES.len(),
            "Handlebars engine ready"
        );

        Self {
            registry,
            broken_partials: 0,
        }
    }

    /// Register `partial` as a stand-in that fails with `message` when invoked.
    fn register_broken_partial(&mut self, partial: &Partial, message: String) -> HbrevResult<()> {
        let helper = format!("__hbrev_broken_partial_{}", self.broken_partials);
        self.broken_partials += 1;

        self.registry
            .register_helper(&helper, Box::new(BrokenPartial { message }));
        self.registry
            .register_partial(partial.name().as_str(), format!("{{{{{helper}}}}}"))
            .map_err(|e| ApplicationError::PartialRegistration {
                name: partial.name().to_string(),
                path: partial.origin().to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(())
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new(HandlebarsOptions::default())
    }
}

impl TemplateEngine for HandlebarsEngine {
    fn register_partial(&mut self, partial: &Partial) -> HbrevResult<()> {
        let name = partial.name().as_str();
        let origin = partial.origin();

        if let Err(e) = self.registry.register_partial(name, partial.source()) {
            let failure = ApplicationError::PartialRegistration {
                name: name.to_owned(),
                path: origin.to_path_buf(),
                reason: e.in_template(origin.display().to_string()).to_string(),
            };
            warn!(name, origin = %origin.display(), "Partial does not compile; it fails only if used");
            return self.register_broken_partial(partial, failure.to_string());
        }

        trace!(name, origin = %origin.display(), "Partial registered");
        Ok(())
    }

    fn compile(&mut self, origin: &Path, source: &str) -> HbrevResult<CompiledTemplate> {
        self.registry
            .register_template_string(MAIN_TEMPLATE_KEY, source)
            .map_err(|e| ApplicationError::TemplateCompile {
                path: origin.to_path_buf(),
                reason: e.in_template(origin.display().to_string()).to_string(),
            })?;

        Ok(CompiledTemplate::new(MAIN_TEMPLATE_KEY, origin))
    }

    fn render(&self, template: &CompiledTemplate, data: &RenderData) -> HbrevResult<String> {
        let rendered = self
            .registry
            .render(template.key(), data.as_value())
            .map_err(|e| ApplicationError::Render {
                path: template.origin().to_path_buf(),
                reason: describe_render_error(&e),
            })?;
        Ok(rendered)
    }
}

/// Render error text without the engine's internal main-template key.
fn describe_render_error(e: &RenderError) -> String {
    let mut location = Vec::new();
    if let Some(name) = e
        .template_name
        .as_deref()
        .filter(|name| *name != MAIN_TEMPLATE_KEY)
    {
        location.push(format!("in partial '{name}'"));
    }
    if let (Some(line), Some(column)) = (e.line_no, e.column_no) {
        location.push(format!("at line {line}, col {column}"));
    }

    if location.is_empty() {
        e.reason().to_string()
    } else {
        format!("{}: {}", location.join(" "), e.reason())
    }
}

/// Helper behind a partial that failed to compile.
struct BrokenPartial {
    message: String,
}

impl HelperDef for BrokenPartial {
    fn call<'reg: 'rc, 'rc>(
        &self,
        _: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        _: &mut dyn Output,
    ) -> HelperResult {
        Err(RenderErrorReason::Other(self.message.clone()).into())
    }
}
