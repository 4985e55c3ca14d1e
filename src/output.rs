//! File naming and persistence for flight records and reports.
//!
//! Daily records live in `YYYYMMDD_<direction>.csv`, merged ones in
//! `merged_<direction>.csv`, and the dashboard report is pretty JSON.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analyzers::types::AnalysisReport;
use crate::record::{Direction, FlightRecord};

/// `YYYYMMDD_<direction>.<ext>`, e.g. `20240304_arrivals.csv`.
pub fn daily_file_name(date: NaiveDate, direction: Direction, ext: &str) -> String {
    format!("{}_{}.{}", date.format("%Y%m%d"), direction.plural(), ext)
}

/// `merged_<direction>.csv`.
pub fn merged_file_name(direction: Direction) -> String {
    format!("merged_{}.csv", direction.plural())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `records` to a CSV file with a header row, replacing any existing
/// file.
pub fn write_records(path: impl AsRef<Path>, records: &[FlightRecord]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    debug!(path = %path.display(), rows = records.len(), "Writing CSV records");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads every row of a flight-record CSV file.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<FlightRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (i, result) in reader.deserialize().enumerate() {
        let record: FlightRecord =
            result.with_context(|| format!("{}: bad row {}", path.display(), i + 1))?;
        rows.push(record);
    }

    Ok(rows)
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Writes the dashboard report as pretty JSON.
pub fn write_report(path: impl AsRef<Path>, report: &AnalysisReport) -> Result<()> {
    write_json(path.as_ref(), report)?;
    info!(path = %path.as_ref().display(), "Report written");
    Ok(())
}

/// Stores a raw API response body untouched.
pub fn write_raw(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Deletes temporary files. Failures are logged and otherwise ignored.
pub fn cleanup_files(paths: &[PathBuf]) {
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "Cleaned up temporary file"),
            Err(e) => warn!(path = %path.display(), error = %e, "Could not delete temporary file"),
        }
    }
}

/// Logs the headline numbers of a report.
pub fn print_summary(report: &AnalysisReport) {
    for (direction, r) in [
        (Direction::Arrival, &report.arrivals),
        (Direction::Departure, &report.departures),
    ] {
        info!(
            %direction,
            flights_per_day = r.stats.flights_per_day,
            days_tracked = r.stats.days_tracked,
            average_delay = r.stats.average_delay,
            on_time = r.stats.delays.on_time,
            "Direction summary"
        );
    }
}
