//! Read/write bounds JSON files.
//!
//! Bounds JSON is the portable representation of one run:
//! - sampling metadata (dt, sample count, perturbation)
//! - the frequency grid including the DC entry
//! - the exact and/or selective amplitude bounds as `[lo, hi]` pairs
//!
//! The schema is defined by `domain::BoundsFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{Algorithm, AlgorithmChoice, BoundsFile, Perturbation};
use crate::error::AppError;
use crate::spectrum::SpectrumBounds;

/// Assemble the file contents for a run (bounds are expected to include DC).
pub fn bounds_file(
    bounds: &SpectrumBounds,
    dt: f64,
    n_samples: usize,
    perturbation: Perturbation,
    choice: AlgorithmChoice,
) -> BoundsFile {
    BoundsFile {
        tool: "ispec".to_string(),
        generated_at: Utc::now(),
        dt,
        n_samples,
        perturbation,
        omega: bounds.frequencies.clone(),
        exact: choice
            .includes(Algorithm::Exact)
            .then(|| bounds.exact.clone()),
        selective: choice
            .includes(Algorithm::Selective)
            .then(|| bounds.selective.clone()),
    }
}

/// Write a bounds JSON file.
pub fn write_bounds_json(path: &Path, contents: &BoundsFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create bounds JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, contents)
        .map_err(|e| AppError::new(4, format!("Failed to write bounds JSON: {e}")))?;

    Ok(())
}

/// Read a bounds JSON file, checking that every sequence matches the grid.
pub fn read_bounds_json(path: &Path) -> Result<BoundsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open bounds JSON '{}': {e}", path.display())))?;
    let contents: BoundsFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid bounds JSON: {e}")))?;

    let k = contents.omega.len();
    for (name, seq) in [("exact", &contents.exact), ("selective", &contents.selective)] {
        if let Some(seq) = seq {
            if seq.len() != k {
                return Err(AppError::new(
                    2,
                    format!("Bounds JSON: `{name}` has {} entries but `omega` has {k}.", seq.len()),
                ));
            }
        }
    }

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IntervalNumber;

    fn sample_bounds() -> SpectrumBounds {
        SpectrumBounds {
            frequencies: vec![1.0, 2.0],
            exact: vec![
                IntervalNumber::new(0.5, 1.0).unwrap(),
                IntervalNumber::new(0.0, 2.0).unwrap(),
            ],
            selective: vec![
                IntervalNumber::new(0.5, 1.0).unwrap(),
                IntervalNumber::new(0.0, 2.0).unwrap(),
            ],
        }
        .with_dc()
    }

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bounds.json");
        let file = bounds_file(
            &sample_bounds(),
            0.1,
            4,
            Perturbation::Relative { p: 0.1 },
            AlgorithmChoice::Exact,
        );
        write_bounds_json(&path, &file).unwrap();

        let back = read_bounds_json(&path).unwrap();
        assert_eq!(back.omega, vec![0.0, 1.0, 2.0]);
        assert_eq!(back.exact.as_deref(), file.exact.as_deref());
        assert!(back.selective.is_none());
        assert_eq!(back.perturbation, Perturbation::Relative { p: 0.1 });
    }

    #[test]
    fn rejects_misaligned_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"tool":"ispec","generated_at":"2026-01-01T00:00:00Z","dt":1.0,"n_samples":2,
               "perturbation":{"kind":"none"},"omega":[0.0,1.0],"exact":[[0.0,0.0]]}"#,
        )
        .unwrap();
        assert_eq!(read_bounds_json(&path).unwrap_err().exit_code(), 2);
    }
}
