//! Implementation of the `idp-lite create` command.
//!
//! Responsibility: translate CLI arguments into a `GenerateRequest`, call the
//! core generator, and display results. No business logic lives here.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, instrument};

use idp_adapters::{LocalFilesystem, resolve_template_root};
use idp_core::{
    application::{GenerateRequest, ServiceGenerator, TargetPolicy},
    domain::{GenerationReport, PlannedEntry},
};

use crate::{
    cli::{CreateArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `idp-lite create` command.
///
/// Template root precedence: `--template-dir`, then `templates.root` from
/// the config, then the built-in template.
#[instrument(skip_all, fields(service = %args.name))]
pub fn execute(args: CreateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let override_root = args.template_dir.as_deref().or(config.templates.root.as_deref());
    let template_root = resolve_template_root(override_root);
    debug!(template_root = %template_root.display(), "Template root resolved");

    let generator = ServiceGenerator::new(Box::new(LocalFilesystem::new()), template_root);
    let request = build_request(&args);

    if args.dry_run {
        let (target, planned) = generator.plan(&request)?;
        return show_plan(&args.name, target, planned, &output);
    }

    let report = generator.generate(&request)?;
    show_report(&report, &output)
}

fn build_request(args: &CreateArgs) -> GenerateRequest {
    let mut request = GenerateRequest::new(args.name.clone());
    if let Some(out) = &args.out {
        request = request.out_dir(out.clone());
    }
    if args.fresh {
        request = request.target_policy(TargetPolicy::RequireAbsent);
    }
    request
}

fn show_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    let message = format!("Service generated at {}", report.target.display());

    match output.format() {
        OutputFormat::Json => output.json(report)?,
        OutputFormat::Human => {
            output.success(&message)?;
            output.info(&format!(
                "{} directories, {} files ({} rendered, {} binary, {} relocated), {} skipped",
                report.directories,
                report.files_written(),
                report.text_files,
                report.binary_files,
                report.relocated,
                report.skipped,
            ))?;
        }
        OutputFormat::Plain | OutputFormat::Auto => output.result(&message)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    service: &'a str,
    target: PathBuf,
    operations: Vec<PlannedEntry>,
}

fn show_plan(
    service: &str,
    target: PathBuf,
    planned: Vec<PlannedEntry>,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        return output.json(&PlanDocument {
            service,
            target,
            operations: planned,
        });
    }

    output.header(&format!(
        "Dry run: would generate '{service}' at {}",
        target.display()
    ))?;
    for entry in &planned {
        let line = if entry.source == entry.destination {
            format!("  {:<11} {}", entry.operation.as_str(), entry.destination.display())
        } else {
            format!(
                "  {:<11} {} -> {}",
                entry.operation.as_str(),
                entry.source.display(),
                entry.destination.display()
            )
        };
        output.print(&line)?;
    }
    output.print(&format!("{} operations, nothing written", planned.len()))?;
    Ok(())
}
