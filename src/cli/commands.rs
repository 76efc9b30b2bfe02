use crate::config::load_for_spec;
use crate::error::{ErrorReport, ScenarioError};
use crate::feature::OutputFormat;
use crate::scenario::ScenarioType;
use crate::service::ScenarioService;
use crate::spec::{EndpointFilter, EndpointSummary};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line interface for oas-gherkin
///
/// Derives Gherkin behavioral test scenarios from OpenAPI 3.x documents.
#[derive(Parser)]
#[command(name = "oas-gherkin")]
#[command(about = "Generate Gherkin test scenarios from OpenAPI specifications", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the operations of a document
    List {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Only this HTTP method (case-insensitive)
        #[arg(short, long)]
        method: Option<String>,

        /// Only operations carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only paths containing this text
        #[arg(short, long)]
        path: Option<String>,

        /// Group the listing by tag
        #[arg(long, default_value_t = false)]
        group_by_tag: bool,

        /// Print JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the resolved analysis of one operation as JSON
    Analyze {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Path template, e.g. `/items/{id}`
        #[arg(short, long)]
        path: String,

        /// HTTP method
        #[arg(short, long)]
        method: String,
    },
    /// Generate scenarios for one operation or for all of them
    Generate {
        /// Path to the OpenAPI specification file (YAML or JSON)
        #[arg(short, long)]
        spec: PathBuf,

        /// Path template of a single operation (requires --method)
        #[arg(short, long, requires = "method")]
        path: Option<String>,

        /// HTTP method of a single operation (requires --path)
        #[arg(short, long, requires = "path")]
        method: Option<String>,

        /// Only operations carrying this tag (batch mode)
        #[arg(short, long, conflicts_with = "path")]
        tag: Option<String>,

        /// Comma-separated scenario types, e.g. `required_fields,not_found`
        #[arg(long)]
        types: Option<String>,

        /// Output format: gherkin, json or markdown
        #[arg(short, long)]
        format: Option<String>,

        /// Directory receiving one `<operation_id>.<ext>` file per operation
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Settings file; defaults to `oas-gherkin.toml` next to the spec
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// What happened to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteStatus {
    Written,
    Skipped,
    DryRun,
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The OpenAPI spec or the config file cannot be loaded
/// - A flag value is invalid (scenario type, format)
/// - Analysis or generation fails for the selected operation
/// - Any operation fails or the run is interrupted in batch mode
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::List {
            spec,
            method,
            tag,
            path,
            group_by_tag,
            json,
        } => {
            let service = ScenarioService::load(&spec, Default::default())?;
            let filter = EndpointFilter {
                method,
                tag,
                path_contains: path,
            };
            if group_by_tag {
                let groups = service.group_by_tag(&filter);
                if json {
                    println!("{}", serde_json::to_string_pretty(&groups)?);
                } else {
                    for (tag, endpoints) in &groups {
                        println!("{tag}:");
                        for endpoint in endpoints {
                            println!("  {}", endpoint_line(endpoint));
                        }
                    }
                }
            } else {
                let endpoints = service.list_endpoints(&filter);
                if json {
                    println!("{}", serde_json::to_string_pretty(&endpoints)?);
                } else {
                    for endpoint in &endpoints {
                        println!("{}", endpoint_line(endpoint));
                    }
                }
            }
            Ok(())
        }
        Commands::Analyze { spec, path, method } => {
            let mut service = ScenarioService::load(&spec, Default::default())?;
            let analysis = service.analyze_endpoint(&path, &method)?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            Ok(())
        }
        Commands::Generate {
            spec,
            path,
            method,
            tag,
            types,
            format,
            output,
            force,
            dry_run,
            config,
        } => {
            let mut settings = load_for_spec(config.as_deref(), &spec)?;
            settings.apply_overrides(format.as_deref(), None)?;
            let format = settings.default_format;
            let types = types
                .as_deref()
                .map(ScenarioType::parse_list)
                .transpose()?;
            let mut service = ScenarioService::load(&spec, settings)?;

            if let (Some(path), Some(method)) = (path, method) {
                let feature = service.build_feature(&path, &method, types.as_deref())?;
                let rendered = service.export_feature(&feature, format)?;
                match output {
                    None => print!("{rendered}"),
                    Some(dir) => {
                        let file = output_file(&dir, &feature.metadata.operation_id, format);
                        report_write(&file, write_output(&file, &rendered, force, dry_run)?);
                    }
                }
                return Ok(());
            }

            let Some(dir) = output else {
                bail!("--output is required when generating for every operation (or pass --path and --method)");
            };
            let filter = EndpointFilter {
                tag,
                ..EndpointFilter::default()
            };
            let cancel = cancellation_flag();
            let outcomes = service.generate_all_features(&filter, types.as_deref(), &cancel);

            let mut failed = 0usize;
            for outcome in &outcomes {
                let rendered = outcome
                    .result
                    .as_ref()
                    .map_err(Clone::clone)
                    .and_then(|feature| service.export_feature(feature, format));
                match rendered {
                    Ok(rendered) => {
                        let file = output_file(&dir, &outcome.endpoint.operation_id, format);
                        report_write(&file, write_output(&file, &rendered, force, dry_run)?);
                    }
                    Err(err) => {
                        failed += 1;
                        print_report(&err.report());
                    }
                }
            }

            if cancel.load(Ordering::SeqCst) {
                bail!(
                    "interrupted after {} of {} operations",
                    outcomes.len(),
                    service.list_endpoints(&filter).len()
                );
            }
            if failed > 0 {
                bail!("{failed} of {} operations failed", outcomes.len());
            }
            info!(features = outcomes.len(), output = %dir.display(), "generation complete");
            Ok(())
        }
    }
}

fn endpoint_line(endpoint: &EndpointSummary) -> String {
    let mut line = format!(
        "{:<7} {}  {}",
        endpoint.method, endpoint.path, endpoint.operation_id
    );
    if let Some(summary) = &endpoint.summary {
        line.push_str(&format!("  {summary}"));
    }
    if endpoint.deprecated {
        line.push_str("  (deprecated)");
    }
    line
}

/// Operation ids become file names; anything outside `[A-Za-z0-9_.-]` maps to `_`.
fn output_file(dir: &Path, operation_id: &str, format: OutputFormat) -> PathBuf {
    let stem: String = operation_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{stem}.{}", format.file_extension()))
}

fn write_output(file: &Path, contents: &str, force: bool, dry_run: bool) -> anyhow::Result<WriteStatus> {
    if file.exists() && !force {
        return Ok(WriteStatus::Skipped);
    }
    if dry_run {
        return Ok(WriteStatus::DryRun);
    }
    if let Some(parent) = file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(file, contents).with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(WriteStatus::Written)
}

fn report_write(file: &Path, status: WriteStatus) {
    match status {
        WriteStatus::Written => println!("wrote {}", file.display()),
        WriteStatus::Skipped => println!("skipped {} (exists, use --force)", file.display()),
        WriteStatus::DryRun => println!("would write {}", file.display()),
    }
}

/// Set once SIGINT arrives; the batch loop stops before the next operation.
fn cancellation_flag() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    #[cfg(unix)]
    if let Err(err) = signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&flag)) {
        warn!(error = %err, "could not install SIGINT handler");
    }
    flag
}

fn print_report(report: &ErrorReport) {
    match serde_json::to_string(report) {
        Ok(line) => eprintln!("{line}"),
        Err(_) => eprintln!("{}", report.message),
    }
}

/// Structured record for a failed command. Library errors keep their kind;
/// anything else (config, file output) is reported as `cli`.
pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    match err.downcast_ref::<ScenarioError>() {
        Some(scenario_error) => scenario_error.report(),
        None => ErrorReport {
            kind: "cli",
            message: format!("{err:#}"),
            details: json!({}),
        },
    }
}
