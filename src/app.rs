//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initialises logging
//! - parses CLI arguments
//! - builds the model registry
//! - runs extraction for one or many curves
//! - prints reports and writes optional exports

use clap::Parser;
use log::info;

use crate::cli::{BatchArgs, Command, ParamsArgs};
use crate::error::AppError;
use crate::extract::coverage;
use crate::models::ModelRegistry;

pub mod pipeline;

/// Entry point for the `tpc` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();
    let registry = ModelRegistry::standard();

    match cli.command {
        Command::Params(args) => handle_params(&registry, args),
        Command::Batch(args) => handle_batch(&registry, args),
        Command::Models => {
            println!("{}", format_models(&registry));
            Ok(())
        }
    }
}

fn handle_params(registry: &ModelRegistry, args: ParamsArgs) -> Result<(), AppError> {
    let config = args.extract.to_config();
    config.validate()?;

    let run = pipeline::run_single(registry, &args.curve, args.data.as_deref(), &config)?;
    let rows = std::slice::from_ref(&run.row);

    if args.json {
        println!("{}", crate::io::params_json(rows)?);
    } else {
        println!("{}", crate::report::format_curve_summary(&run.row, &run.fitted, run.domain));
    }

    if let Some(path) = &args.export {
        crate::io::export_params_csv(path, rows)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn handle_batch(registry: &ModelRegistry, args: BatchArgs) -> Result<(), AppError> {
    let config = args.extract.to_config();
    let rows = pipeline::run_batch(registry, &args.curves, &config)?;

    if args.json {
        println!("{}", crate::io::params_json(&rows)?);
    } else {
        let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
        println!("{}", crate::report::format_batch_table(&rows, &columns));

        let results: Vec<_> = rows
            .iter()
            .map(|r| r.params.clone().ok_or(()))
            .collect();
        println!("{}", crate::report::format_coverage(&coverage(&results)));
    }

    if let Some(path) = &args.export {
        crate::io::export_params_csv(path, &rows)?;
        info!("wrote {} rows to {}", rows.len(), path.display());
    }
    Ok(())
}

fn format_models(registry: &ModelRegistry) -> String {
    let mut out = String::from("Supported models:\n");
    for family in registry.families() {
        out.push_str(&format!("  {:<24} {}\n", family.name(), family.param_names().join(", ")));
    }
    out
}
