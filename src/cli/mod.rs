//! Command-line parsing for the interval DFT bound tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::AlgorithmChoice;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ispec",
    version,
    about = "Guaranteed DFT amplitude bounds for interval-valued signals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute exact and selective amplitude bounds, print diagnostics, and optionally export.
    Bounds(BoundsArgs),
    /// Compute bounds and verify them against random realizations of the signal.
    Check(CheckArgs),
    /// Print a bounds JSON file written by `ispec bounds --export-json`.
    Show(ShowArgs),
}

/// Common options for computing bounds.
#[derive(Debug, Args, Clone)]
pub struct BoundsArgs {
    /// Signal file (JSON with `samples`/`intervals`, or CSV with `x` or `lo,hi` columns).
    #[arg(short = 's', long, value_name = "FILE")]
    pub signal: PathBuf,

    /// Sampling step in seconds (overrides the file).
    #[arg(long)]
    pub dt: Option<f64>,

    /// Symmetric relative perturbation p: each sample x becomes [x - p|x|, x + p|x|].
    #[arg(short = 'p', long, conflicts_with_all = ["lower", "upper", "absolute"])]
    pub perturbation: Option<f64>,

    /// Relative perturbation below each sample (use with --upper).
    #[arg(long, requires = "upper", conflicts_with = "absolute")]
    pub lower: Option<f64>,

    /// Relative perturbation above each sample (use with --lower).
    #[arg(long, requires = "lower", conflicts_with = "absolute")]
    pub upper: Option<f64>,

    /// Absolute half-width w: each sample x becomes [x - w, x + w].
    #[arg(long)]
    pub absolute: Option<f64>,

    /// Which bound sequence(s) to print and export.
    #[arg(long, value_enum, default_value_t = AlgorithmChoice::Both)]
    pub algorithm: AlgorithmChoice,

    /// Evaluate frequencies on the calling thread instead of the rayon pool.
    #[arg(long)]
    pub sequential: bool,

    /// Show the N frequencies with the widest exact bound (0 = all, in grid order).
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Export per-frequency bounds to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export bounds (with run metadata) to JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

/// Options for the Monte-Carlo check.
#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub bounds: BoundsArgs,

    /// Number of random realizations to draw.
    #[arg(short = 'm', long, default_value_t = 1000)]
    pub samples: usize,

    /// Random seed for the realizations.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for printing a saved bounds file.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Bounds JSON file produced by `ispec bounds --export-json`.
    #[arg(long, value_name = "JSON")]
    pub bounds: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bounds_with_relative_perturbation() {
        let cli = Cli::try_parse_from(["ispec", "bounds", "--signal", "x.csv", "-p", "0.05", "--sequential"])
            .unwrap();
        match cli.command {
            Command::Bounds(args) => {
                assert_eq!(args.perturbation, Some(0.05));
                assert!(args.sequential);
                assert_eq!(args.algorithm, AlgorithmChoice::Both);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn conflicting_perturbations_are_rejected() {
        assert!(Cli::try_parse_from(["ispec", "bounds", "-s", "x.csv", "-p", "0.1", "--absolute", "1"]).is_err());
        assert!(Cli::try_parse_from(["ispec", "bounds", "-s", "x.csv", "--lower", "0.1"]).is_err());
    }

    #[test]
    fn check_flattens_bound_options() {
        let cli = Cli::try_parse_from([
            "ispec", "check", "-s", "x.json", "--algorithm", "exact", "-m", "50", "--seed", "3",
        ])
        .unwrap();
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.samples, 50);
                assert_eq!(args.seed, 3);
                assert_eq!(args.bounds.algorithm, AlgorithmChoice::Exact);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
