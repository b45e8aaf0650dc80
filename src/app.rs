//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the bound pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{BoundsArgs, CheckArgs, Command, ShowArgs};
use crate::domain::{Execution, Perturbation, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ispec` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Bounds(args) => handle_bounds(&args),
        Command::Check(args) => handle_check(&args),
        Command::Show(args) => handle_show(&args),
    }
}

fn handle_bounds(args: &BoundsArgs) -> Result<(), AppError> {
    let config = run_config_from_args(args, None);
    let run = pipeline::run_bounds(&config)?;

    print_run(&run, &config);
    write_exports(&run, &config)
}

fn handle_check(args: &CheckArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.bounds, Some(args));
    let check = pipeline::run_check(&config)?;

    print_run(&check.run, &config);
    println!(
        "{}",
        crate::report::format_dominance(&check.report, config.samples, config.seed)
    );
    write_exports(&check.run, &config)?;

    if check.report.holds() {
        Ok(())
    } else {
        Err(AppError::new(
            4,
            format!(
                "Monte-Carlo envelope escaped the exact bound at {} frequencies.",
                check.report.violations.len()
            ),
        ))
    }
}

fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let file = crate::io::bounds::read_bounds_json(&args.bounds)?;
    println!("{}", crate::report::format_bounds_file(&file));
    Ok(())
}

fn print_run(run: &pipeline::RunOutput, config: &RunConfig) {
    println!("{}", crate::report::format_run_summary(run, config));

    let rows = if config.top_n == 0 {
        run.diagnostics.clone()
    } else {
        crate::report::rank_widest(&run.diagnostics, config.top_n)
    };
    println!("{}", crate::report::format_bounds_table(&rows, config.algorithm));
}

fn write_exports(run: &pipeline::RunOutput, config: &RunConfig) -> Result<(), AppError> {
    if config.export_csv.is_none() && config.export_json.is_none() {
        return Ok(());
    }

    let bounds = run.bounds_with_dc();
    if let Some(path) = &config.export_csv {
        let reference = run.reference_with_dc();
        crate::io::export::write_bounds_csv(path, &bounds, config.algorithm, Some(&reference))?;
        tracing::info!(path = %path.display(), "wrote bounds CSV");
    }
    if let Some(path) = &config.export_json {
        let contents = crate::io::bounds::bounds_file(
            &bounds,
            run.data.dt,
            run.signal.len(),
            run.perturbation,
            config.algorithm,
        );
        crate::io::bounds::write_bounds_json(path, &contents)?;
        tracing::info!(path = %path.display(), "wrote bounds JSON");
    }

    Ok(())
}

/// Fold CLI flags into the pipeline's configuration.
///
/// `check` carries the Monte-Carlo settings; plain `bounds` runs use the defaults.
pub fn run_config_from_args(args: &BoundsArgs, check: Option<&CheckArgs>) -> RunConfig {
    RunConfig {
        signal_path: args.signal.clone(),
        dt: args.dt,
        perturbation: perturbation_from_args(args),
        algorithm: args.algorithm,
        execution: if args.sequential {
            Execution::Sequential
        } else {
            Execution::Parallel
        },
        top_n: args.top,
        samples: check.map_or(1000, |c| c.samples),
        seed: check.map_or(42, |c| c.seed),
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Clap enforces that at most one perturbation family is given.
fn perturbation_from_args(args: &BoundsArgs) -> Perturbation {
    if let Some(p) = args.perturbation {
        return Perturbation::Relative { p };
    }
    if let (Some(lower), Some(upper)) = (args.lower, args.upper) {
        return Perturbation::Asymmetric { lower, upper };
    }
    if let Some(half_width) = args.absolute {
        return Perturbation::Absolute { half_width };
    }
    Perturbation::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn bounds_args(argv: &[&str]) -> BoundsArgs {
        let mut full = vec!["ispec", "bounds", "--signal", "sig.csv"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Bounds(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn perturbation_flags_map_to_variants() {
        assert_eq!(perturbation_from_args(&bounds_args(&[])), Perturbation::None);
        assert_eq!(
            perturbation_from_args(&bounds_args(&["-p", "0.1"])),
            Perturbation::Relative { p: 0.1 }
        );
        assert_eq!(
            perturbation_from_args(&bounds_args(&["--lower", "0.1", "--upper", "0.2"])),
            Perturbation::Asymmetric { lower: 0.1, upper: 0.2 }
        );
        assert_eq!(
            perturbation_from_args(&bounds_args(&["--absolute", "0.5"])),
            Perturbation::Absolute { half_width: 0.5 }
        );
    }

    #[test]
    fn config_defaults() {
        let config = run_config_from_args(&bounds_args(&["--sequential", "--top", "3"]), None);
        assert_eq!(config.execution, Execution::Sequential);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.samples, 1000);
        assert!(config.export_csv.is_none());
    }
}
