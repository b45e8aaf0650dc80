//! Export per-frequency bounds to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or by the
//! periodogram/plotting scripts downstream.

use std::fs::File;
use std::path::Path;

use crate::domain::{Algorithm, AlgorithmChoice};
use crate::error::AppError;
use crate::spectrum::SpectrumBounds;

/// Write `omega` plus an `<algorithm>_lo,<algorithm>_hi` column pair for each
/// algorithm selected by `choice` (exact first).
///
/// `reference` (precise amplitudes, same length as the bounds) adds a
/// `reference` column when present.
pub fn write_bounds_csv(
    path: &Path,
    bounds: &SpectrumBounds,
    choice: AlgorithmChoice,
    reference: Option<&[f64]>,
) -> Result<(), AppError> {
    if let Some(r) = reference {
        if r.len() != bounds.len() {
            return Err(AppError::new(
                4,
                format!("Reference has {} entries, bounds have {}.", r.len(), bounds.len()),
            ));
        }
    }

    let shown: Vec<Algorithm> = Algorithm::ALL
        .into_iter()
        .filter(|alg| choice.includes(*alg))
        .collect();

    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut writer = csv::Writer::from_writer(file);

    let mut header = vec!["omega".to_string()];
    for alg in &shown {
        let name = column_prefix(*alg);
        header.push(format!("{name}_lo"));
        header.push(format!("{name}_hi"));
    }
    if reference.is_some() {
        header.push("reference".to_string());
    }
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for k in 0..bounds.len() {
        let mut row = vec![format!("{:.10}", bounds.frequencies[k])];
        for alg in &shown {
            let b = bounds.bound(*alg)[k];
            row.push(format!("{:.10}", b.lo()));
            row.push(format!("{:.10}", b.hi()));
        }
        if let Some(r) = reference {
            row.push(format!("{:.10}", r[k]));
        }
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

fn column_prefix(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Exact => "exact",
        Algorithm::Selective => "selective",
    }
}
