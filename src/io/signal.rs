//! Signal file ingest (JSON / CSV).
//!
//! Accepted layouts:
//!
//! - JSON: `{ "dt": 0.1, "samples": [..] }` or `{ "dt": 0.1, "intervals": [[lo, hi], ..] }`
//! - CSV with a header row: a precise column `x`, or a `lo,hi` column pair.
//!   An optional `t` column gives `dt`; its stamps must be ordered and evenly
//!   spaced, since the transform assumes a uniform time grid.
//!
//! Any malformed row is an error with its line number. Nothing is skipped or
//! clamped: a silently repaired sample would no longer bound the true signal.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;
use serde::Deserialize;

use crate::domain::{SignalData, SignalSamples};
use crate::error::AppError;
use crate::math::IntervalNumber;
use crate::spectrum::TimeGrid;

/// Relative slack between CSV time steps (stamps are printed with limited digits).
const TIME_STEP_REL_TOL: f64 = 1e-6;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SignalJson {
    dt: Option<f64>,
    samples: Option<Vec<f64>>,
    intervals: Option<Vec<IntervalNumber>>,
}

/// Load a signal file, choosing the parser from the extension (`.json`, else CSV).
///
/// `dt_override` wins over any step stored in (or inferred from) the file.
pub fn load_signal(path: &Path, dt_override: Option<f64>) -> Result<SignalData, AppError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let (file_dt, samples) = if is_json {
        read_json(path)?
    } else {
        read_csv(path)?
    };

    if samples.is_empty() {
        return Err(AppError::new(
            3,
            format!("Signal file '{}' contains no samples.", path.display()),
        ));
    }

    let dt = dt_override.or(file_dt).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "No time step for '{}': pass --dt, add \"dt\" to the JSON, or a `t` column to the CSV.",
                path.display()
            ),
        )
    })?;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(AppError::new(2, format!("Invalid time step dt={dt} (must be finite and > 0).")));
    }

    Ok(SignalData { dt, samples })
}

fn read_json(path: &Path) -> Result<(Option<f64>, SignalSamples), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open signal JSON '{}': {e}", path.display())))?;
    let parsed: SignalJson =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid signal JSON: {e}")))?;

    let samples = match (parsed.samples, parsed.intervals) {
        (Some(v), None) => {
            if let Some(idx) = v.iter().position(|x| !x.is_finite()) {
                return Err(AppError::new(2, format!("Signal JSON sample {idx} is not finite.")));
            }
            SignalSamples::Precise(v)
        }
        (None, Some(v)) => SignalSamples::Intervals(v),
        _ => {
            return Err(AppError::new(
                2,
                "Signal JSON must contain exactly one of \"samples\" or \"intervals\".",
            ));
        }
    };

    Ok((parsed.dt, samples))
}

#[derive(Debug, Clone, Copy)]
enum CsvLayout {
    Precise { x: usize },
    Interval { lo: usize, hi: usize },
}

fn read_csv(path: &Path) -> Result<(Option<f64>, SignalSamples), AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open signal CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let layout = match (header_map.get("lo"), header_map.get("hi"), header_map.get("x")) {
        (Some(&lo), Some(&hi), _) => CsvLayout::Interval { lo, hi },
        (None, None, Some(&x)) => CsvLayout::Precise { x },
        _ => {
            return Err(AppError::new(
                2,
                "Signal CSV needs either an `x` column or both `lo` and `hi` columns.",
            ));
        }
    };
    let t_col = header_map.get("t").copied();

    let mut times = Vec::new();
    let mut precise = Vec::new();
    let mut intervals = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, header on line 1.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("CSV parse error on line {line}: {e}")))?;

        if let Some(col) = t_col {
            times.push(parse_field(&record, col, "t", line)?);
        }
        match layout {
            CsvLayout::Precise { x } => precise.push(parse_field(&record, x, "x", line)?),
            CsvLayout::Interval { lo, hi } => {
                let lo = parse_field(&record, lo, "lo", line)?;
                let hi = parse_field(&record, hi, "hi", line)?;
                let iv = IntervalNumber::new(lo, hi)
                    .map_err(|e| AppError::new(2, format!("Line {line}: {e}")))?;
                intervals.push(iv);
            }
        }
    }

    let dt = if t_col.is_some() {
        TimeGrid::new(times)
            .and_then(|grid| grid.uniform_step(TIME_STEP_REL_TOL))
            .map_err(|e| AppError::new(2, format!("Signal CSV `t` column: {e}")))?
    } else {
        None
    };
    let samples = match layout {
        CsvLayout::Precise { .. } => SignalSamples::Precise(precise),
        CsvLayout::Interval { .. } => SignalSamples::Intervals(intervals),
    };

    Ok((dt, samples))
}

fn parse_field(record: &StringRecord, col: usize, name: &str, line: usize) -> Result<f64, AppError> {
    let raw = record
        .get(col)
        .ok_or_else(|| AppError::new(2, format!("Line {line}: missing `{name}` value.")))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| AppError::new(2, format!("Line {line}: `{name}` is not a number: '{raw}'.")))?;
    if !v.is_finite() {
        return Err(AppError::new(2, format!("Line {line}: `{name}` is not finite.")));
    }
    Ok(v)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports may prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}
