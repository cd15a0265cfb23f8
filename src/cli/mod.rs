//! Command-line parsing for the `tpc` parameter extractor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the extraction code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ExtractConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tpc", version, about = "Thermal performance curve parameter extraction")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Derive topt, rmax, thermal limits and energies for one fitted curve.
    Params(ParamsArgs),
    /// Derive parameters for many fitted curves in parallel.
    Batch(BatchArgs),
    /// List the supported model families and their parameters.
    Models,
}

/// Numeric knobs of the extraction engine.
#[derive(Debug, Args, Clone)]
pub struct ExtractArgs {
    /// Grid step used to locate topt/rmax and for local regressions.
    #[arg(long, default_value_t = 1.0)]
    pub coarse_step: f64,

    /// Grid step of the thermal-limit search.
    #[arg(long, default_value_t = 0.001)]
    pub fine_step: f64,

    /// How far past the observed temperatures the thermal-limit search extrapolates.
    #[arg(long, default_value_t = 50.0)]
    pub extrapolation: f64,

    /// Fraction of rmax used as the thermal limit when the curve never reaches zero.
    #[arg(long, default_value_t = 0.05)]
    pub threshold_fraction: f64,

    /// Fraction of rmax defining the thermal performance breadth.
    #[arg(long, default_value_t = 0.8)]
    pub breadth_level: f64,
}

impl ExtractArgs {
    pub fn to_config(&self) -> ExtractConfig {
        ExtractConfig {
            coarse_step: self.coarse_step,
            fine_step: self.fine_step,
            extrapolation: self.extrapolation,
            threshold_fraction: self.threshold_fraction,
            breadth_level: self.breadth_level,
        }
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ParamsArgs {
    /// Curve JSON (model name, fitted params, observed temps).
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Observation CSV whose `temp` column replaces the curve file's temps.
    #[arg(long, value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Print the bundle as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Export the bundle to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct BatchArgs {
    /// Curve JSON files.
    #[arg(required = true, value_name = "JSON")]
    pub curves: Vec<PathBuf>,

    /// Print the bundles as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Export all bundles to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Columns shown in the terminal table.
    #[arg(long, value_delimiter = ',', default_value = "topt,rmax,ctmin,ctmax,e,eh")]
    pub columns: Vec<String>,

    #[command(flatten)]
    pub extract: ExtractArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let cli = Cli::parse_from(["tpc", "params", "--curve", "c.json"]);
        let Command::Params(args) = cli.command else {
            panic!("expected params");
        };
        assert_eq!(args.extract.to_config(), ExtractConfig::default());
        assert!(!args.json);
    }

    #[test]
    fn batch_parses_columns() {
        let cli = Cli::parse_from(["tpc", "batch", "a.json", "b.json", "--columns", "topt,q10", "--fine-step", "0.01"]);
        let Command::Batch(args) = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(args.curves.len(), 2);
        assert_eq!(args.columns, vec!["topt", "q10"]);
        assert_eq!(args.extract.fine_step, 0.01);
    }
}
