//! The render command.
//!
//! Responsibility: turn CLI arguments and config into a `RenderJob`, run the
//! core render service, and report the outcome. No business logic lives here.

use clap::CommandFactory;
use tracing::{info, instrument};

use hbrev_adapters::{HandlebarsEngine, HandlebarsOptions, LocalFilesystem};
use hbrev_core::{
    application::RenderService,
    domain::{RenderJob, RenderJobBuilder, RenderReport},
};

use crate::{
    cli::{Cli, RenderArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute a render.
///
/// 1. Resolve paths (flags over config over defaults)
/// 2. Warn about every missing required option, print help, and stop
/// 3. Run the pipeline with the local filesystem and a fresh engine,
///    reporting partial discovery (or an empty partials directory) as it happens
/// 4. Print the success line
#[instrument(skip_all)]
pub async fn execute(args: RenderArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let builder = job_builder(&args, config);

    let missing = builder.missing_fields();
    if !missing.is_empty() {
        for field in &missing {
            output.warning(&format!("{} parameter is required.", option_label(field)))?;
        }
        Cli::command().print_help()?;
        return Err(CliError::MissingArguments {
            count: missing.len(),
        });
    }

    let job = builder.build().map_err(|e| CliError::Core(e.into()))?;
    let options = engine_options(&args, config);
    info!(
        strict = options.strict,
        escape_html = options.escape_html,
        "Render started"
    );

    let mut service = RenderService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(HandlebarsEngine::new(options)),
    )
    .with_observer(Box::new(output.clone()));
    let report = service.render(&job).await?;

    report_outcome(&report, output)?;
    Ok(())
}

fn job_builder(args: &RenderArgs, config: &AppConfig) -> RenderJobBuilder {
    let mut builder = RenderJob::builder().partials_dir(
        args.partials
            .clone()
            .unwrap_or_else(|| config.render.partials_dir.clone()),
    );
    if let Some(main) = &args.main {
        builder = builder.main(main);
    }
    if let Some(data) = &args.data {
        builder = builder.data(data);
    }
    if let Some(output) = &args.output {
        builder = builder.output(output);
    }
    builder
}

fn engine_options(args: &RenderArgs, config: &AppConfig) -> HandlebarsOptions {
    HandlebarsOptions {
        strict: args.strict || config.render.strict,
        escape_html: !args.no_escape && config.render.escape_html,
    }
}

/// The flag spelling used in warnings for a `RenderJobBuilder` field.
fn option_label(field: &str) -> &'static str {
    match field {
        "main" => "-m or --main",
        "data" => "-d or --data",
        "output" => "-o or --output",
        _ => "a required",
    }
}

fn report_outcome(report: &RenderReport, output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Rendered {} ({} bytes)",
        report.output.display(),
        report.bytes_written
    ))?;
    Ok(())
}
