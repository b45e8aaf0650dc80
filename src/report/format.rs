//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numerical code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{Algorithm, AlgorithmChoice, BoundsFile, Perturbation, RunConfig, SignalSamples};
use crate::math::IntervalNumber;
use crate::report::FrequencyDiagnostic;
use crate::spectrum::DominanceReport;

/// Format the run summary (input, grid, aggregate diagnostics).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ispec - Interval DFT amplitude bounds ===\n");
    out.push_str(&format!("Signal: {}\n", config.signal_path.display()));
    let kind = match run.data.samples {
        SignalSamples::Precise(_) => "precise",
        SignalSamples::Intervals(_) => "interval",
    };
    out.push_str(&format!(
        "Samples: N={} ({kind}) | dt={} | perturbation: {}\n",
        run.signal.len(),
        run.data.dt,
        fmt_perturbation(run.perturbation),
    ));
    out.push_str(&format!(
        "Frequencies: K={} (+ DC) | d_omega={:.6} rad/s\n",
        run.bounds.len(),
        crate::spectrum::resolution(run.signal.len(), run.data.dt),
    ));

    let s = &run.summary;
    out.push_str("\nBound diagnostics:\n");
    out.push_str(&format!("- mean exact width     : {:.6}\n", s.mean_exact_width));
    out.push_str(&format!(
        "- selective looser at  : {} / {} frequencies\n",
        s.n_loose, s.n_frequencies
    ));
    out.push_str(&format!(
        "- selective looseness  : mean={:.6} max={:.6}\n",
        s.mean_looseness, s.max_looseness
    ));
    match s.reference_contained {
        Some(true) => out.push_str("- reference amplitude  : inside exact bounds\n"),
        Some(false) => out.push_str("- reference amplitude  : OUTSIDE exact bounds\n"),
        None => {}
    }
    out.push('\n');

    out
}

/// Format per-frequency rows.
pub fn format_bounds_table(rows: &[FrequencyDiagnostic], choice: AlgorithmChoice) -> String {
    let mut out = String::new();
    let shown: Vec<Algorithm> = Algorithm::ALL
        .into_iter()
        .filter(|alg| choice.includes(*alg))
        .collect();

    let mut header = format!("{:>5} {:>12}", "k", "omega");
    let mut rule = format!("{:-<5} {:-<12}", "", "");
    for alg in &shown {
        header.push_str(&format!(" {:>27}", alg.display_name()));
        rule.push_str(&format!(" {:-<27}", ""));
    }
    header.push_str(&format!(" {:>12}", "reference"));
    rule.push_str(&format!(" {:-<12}", ""));

    out.push_str(header.trim_end());
    out.push('\n');
    out.push_str(rule.trim_end());
    out.push('\n');

    for r in rows {
        let mut line = format!("{:>5} {:>12.6}", r.index + 1, r.omega);
        for alg in &shown {
            let bound = match alg {
                Algorithm::Exact => r.exact,
                Algorithm::Selective => r.selective,
            };
            line.push_str(&format!(" {:>27}", fmt_interval(bound)));
        }
        line.push_str(&format!(" {:>12}", fmt_opt(r.reference)));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Format a Monte-Carlo dominance check.
pub fn format_dominance(report: &DominanceReport, samples: usize, seed: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Monte-Carlo check: {samples} realizations (seed {seed}) over {} frequencies\n",
        report.n_frequencies
    ));
    if report.holds() {
        out.push_str("- inner envelope inside exact bounds at every frequency\n");
    } else {
        out.push_str(&format!(
            "- VIOLATIONS at {} frequencies (max excess {:.3e}): {:?}\n",
            report.violations.len(),
            report.max_excess,
            report.violations.iter().map(|k| k + 1).collect::<Vec<_>>()
        ));
    }
    out.push_str(&format!(
        "- mean envelope/bound width ratio: {:.4}\n",
        report.mean_coverage
    ));
    out
}

/// Format a saved bounds file.
pub fn format_bounds_file(file: &BoundsFile) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} bounds | generated {} | N={} | dt={} | perturbation: {}\n\n",
        file.tool,
        file.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        file.n_samples,
        file.dt,
        fmt_perturbation(file.perturbation),
    ));

    out.push_str(&format!("{:>12} {:>27} {:>27}\n", "omega", "exact", "selective"));
    out.push_str(&format!("{:-<12} {:-<27} {:-<27}\n", "", "", ""));
    for (k, omega) in file.omega.iter().enumerate() {
        let pick = |seq: &Option<Vec<IntervalNumber>>| {
            seq.as_ref()
                .and_then(|v| v.get(k))
                .map(|iv| fmt_interval(*iv))
                .unwrap_or_else(|| "-".to_string())
        };
        let line = format!("{omega:>12.6} {:>27} {:>27}", pick(&file.exact), pick(&file.selective));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn fmt_perturbation(p: Perturbation) -> String {
    match p {
        Perturbation::None => "none".to_string(),
        Perturbation::Relative { p } => format!("relative ±{:.2}%", p * 100.0),
        Perturbation::Asymmetric { lower, upper } => {
            format!("relative -{:.2}% / +{:.2}%", lower * 100.0, upper * 100.0)
        }
        Perturbation::Absolute { half_width } => format!("absolute ±{half_width}"),
    }
}

fn fmt_interval(iv: IntervalNumber) -> String {
    format!("{iv:.6}")
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.6}"),
        _ => "-".to_string(),
    }
}
