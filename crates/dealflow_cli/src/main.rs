//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dealflow_core` linkage with a deterministic version line.
//! - Load pipeline config, start file logging, and evaluate one deal JSON
//!   file through `PipelineService`.
//!
//! Usage: `dealflow_cli [--config PATH] [--log-dir DIR] [DEAL_JSON_PATH [TARGET_STAGE]]`

use clap::Parser;
use dealflow_core::{
    completion_status, core_version, init_logging, Deal, PipelineConfig, PipelineService, Stage,
    ValidationMode,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "dealflow_cli")]
#[command(about = "Evaluate a deal against the stage pipeline", long_about = None)]
struct Cli {
    /// JSON pipeline config; defaults apply when omitted
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for rolling log files; logging stays off when omitted
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    /// Deal record to evaluate
    deal: Option<PathBuf>,

    /// Stage to check eligibility for (e.g. `RFQ`, `Won`)
    target: Option<String>,
}

fn main() -> ExitCode {
    println!("dealflow_core version={}", core_version());

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.log_dir {
        init_logging(&config.log_level, dir)?;
    }
    let service = PipelineService::new(config);

    let Some(path) = &cli.deal else {
        return Ok(());
    };
    evaluate(&service, path, cli.target.as_deref())
}

/// Reads `path` as a pipeline config, or returns defaults for `None`.
fn load_config(path: Option<&Path>) -> Result<PipelineConfig, String> {
    let Some(path) = path else {
        return Ok(PipelineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read config `{}`: {err}", path.display()))?;
    PipelineConfig::from_json_str(&raw)
        .map_err(|err| format!("invalid config `{}`: {err}", path.display()))
}

fn evaluate(service: &PipelineService, path: &Path, target: Option<&str>) -> Result<(), String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read `{}`: {err}", path.display()))?;
    let deal: Deal = serde_json::from_str(&raw)
        .map_err(|err| format!("invalid deal JSON in `{}`: {err}", path.display()))?;

    let view = service.outlook(&deal, ValidationMode::Surfaced);
    let eligible = view
        .eligible
        .iter()
        .map(|stage| stage.as_str())
        .collect::<Vec<_>>()
        .join(",");
    println!("deal_id={} stage={}", deal.id, deal.stage);
    println!("eligible=[{eligible}]");

    let completion = completion_status(&deal);
    println!(
        "completion={}/{} ({}%)",
        completion.filled,
        completion.total,
        completion.percent()
    );
    if let Some(message) = view.detail.and_then(|detail| detail.blocking_message) {
        println!("blocked={message}");
    }

    if let Some(target) = target {
        let target: Stage = target.parse().map_err(|err| format!("{err}"))?;
        println!("can_move_to_{}={}", target, view.eligible.contains(&target));
    }
    Ok(())
}
