use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand};
use datascience::common::{create_directories, save_json};
use datascience::configuration::ConfigPaths;
use datascience::constants::{CONFIG_FILE_PATH, LOG_DIR, PARAMS_FILE_PATH, SCHEMA_FILE_PATH};
use datascience::logging::{self, LogSettings};
use datascience::observability::log_snapshot;
use datascience::pipeline::{StageKind, StageRegistry, TrainingPipeline};
use datascience::stages;
use datascience::validation::validate_configuration;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let Cli {
        config,
        params,
        schema,
        log_dir,
        command,
    } = Cli::parse();

    logging::init(&LogSettings::in_directory(log_dir))?;

    let paths = ConfigPaths {
        config,
        params,
        schema,
    };

    match command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run_pipeline(&paths, args),
        Commands::Stage { name } => run_single_stage(&paths, &name),
        Commands::ListStages => {
            list_stages();
            Ok(())
        }
        Commands::Check => check_configuration(&paths),
    }
}

fn run_pipeline(paths: &ConfigPaths, args: RunArgs) -> Result<()> {
    let registry = build_registry();
    let mut pipeline = TrainingPipeline::standard(&registry, paths)?;
    let metrics_handle = pipeline.metrics();

    let outcome = pipeline.run();

    if args.print_metrics || args.metrics_json.is_some() {
        let snapshot = metrics_handle.snapshot();
        if args.print_metrics {
            log_snapshot(&snapshot);
        }
        if let Some(path) = args.metrics_json {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                create_directories(&[parent], false)?;
            }
            save_json(&path, &snapshot)?;
        }
    }

    outcome
}

fn run_single_stage(paths: &ConfigPaths, name: &str) -> Result<()> {
    let registry = build_registry();
    let stage = registry.create(name, paths)?;
    TrainingPipeline::new(vec![stage]).run()
}

fn list_stages() {
    println!("Pipeline stages:");
    for kind in StageKind::ALL {
        println!("- {} ({})", kind.key(), kind.label());
    }
}

fn check_configuration(paths: &ConfigPaths) -> Result<()> {
    let report = validate_configuration(paths);

    for warning in &report.warnings {
        warn!(file = %paths.config.display(), "{warning}");
    }

    if report.is_ok() {
        info!(file = %paths.config.display(), "Configuration check passed");
        Ok(())
    } else {
        for error_msg in &report.errors {
            error!(file = %paths.config.display(), "{error_msg}");
        }
        Err(anyhow!(
            "Configuration check failed with {} error(s)",
            report.errors.len()
        ))
    }
}

fn build_registry() -> StageRegistry {
    let mut registry = StageRegistry::new();
    stages::register_defaults(&mut registry);
    registry
}

#[derive(Parser)]
#[command(
    name = "datascience",
    version,
    about = "Five-stage supervised training pipeline"
)]
struct Cli {
    #[arg(long, global = true, default_value = CONFIG_FILE_PATH)]
    config: PathBuf,
    #[arg(long, global = true, default_value = PARAMS_FILE_PATH)]
    params: PathBuf,
    #[arg(long, global = true, default_value = SCHEMA_FILE_PATH)]
    schema: PathBuf,
    #[arg(long = "log-dir", global = true, default_value = LOG_DIR)]
    log_dir: PathBuf,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all five stages in order (default)
    Run(RunArgs),
    /// Run a single stage by key
    Stage { name: String },
    /// List stage keys in execution order
    ListStages,
    /// Build every stage configuration without running anything
    Check,
}

#[derive(Args, Default)]
struct RunArgs {
    #[arg(long)]
    print_metrics: bool,
    #[arg(long = "metrics-json")]
    metrics_json: Option<PathBuf>,
}
