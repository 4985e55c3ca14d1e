use crate::analyzers::report::assemble;
use crate::analyzers::types::AnalysisReport;
use crate::config::ReportMetadata;
use crate::output::{read_records, write_report};
use crate::record::Direction;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Loads merged arrival and departure CSVs, builds the report and writes it
/// to `output` as JSON.
pub fn analyze(
    arrivals_csv: &Path,
    departures_csv: &Path,
    output: &Path,
    metadata: &ReportMetadata,
) -> Result<AnalysisReport> {
    let arrivals = read_records(arrivals_csv)
        .with_context(|| format!("loading arrivals from {}", arrivals_csv.display()))?;
    let departures = read_records(departures_csv)
        .with_context(|| format!("loading departures from {}", departures_csv.display()))?;

    for (direction, records) in [
        (Direction::Arrival, &arrivals),
        (Direction::Departure, &departures),
    ] {
        let misfiled = records.iter().filter(|r| r.direction != direction).count();
        if misfiled > 0 {
            warn!(%direction, misfiled, "Records of the other direction found in input");
        }
    }

    info!(
        arrivals = arrivals.len(),
        departures = departures.len(),
        "Starting analysis"
    );

    let report = assemble(&arrivals, &departures, metadata);
    write_report(output, &report)?;

    Ok(report)
}
