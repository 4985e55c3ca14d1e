//! Consolidation of daily record files into one dataset per direction.

use anyhow::{Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::output::{merged_file_name, read_records, write_records};
use crate::record::{Direction, FlightRecord};

/// Daily CSV files for `direction` in `data_dir`, sorted by file name (and
/// therefore by date).
pub fn daily_files(data_dir: impl AsRef<Path>, direction: Direction) -> Result<Vec<PathBuf>> {
    let suffix = format!("_{}.csv", direction.plural());
    let mut files = Vec::new();

    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(&suffix))
            .is_some_and(|stem| stem.len() == 8 && stem.bytes().all(|b| b.is_ascii_digit()));

        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Reads and concatenates every daily file for `direction`.
///
/// Unreadable files are logged and skipped. The result is ordered by date,
/// then scheduled time, then actual time; records missing those sort first.
///
/// # Errors
///
/// Fails if the directory cannot be listed or holds no daily file for
/// `direction`.
pub fn merge_daily(data_dir: impl AsRef<Path>, direction: Direction) -> Result<Vec<FlightRecord>> {
    let data_dir = data_dir.as_ref();
    let files = daily_files(data_dir, direction)?;
    if files.is_empty() {
        bail!(
            "no daily {} files found in {}",
            direction.plural(),
            data_dir.display()
        );
    }

    let mut merged = Vec::new();
    for path in &files {
        match read_records(path) {
            Ok(rows) => {
                info!(path = %path.display(), rows = rows.len(), "Merged daily file");
                merged.extend(rows);
            }
            Err(e) => error!(path = %path.display(), error = %e, "Skipping unreadable daily file"),
        }
    }

    merged.sort_by_key(|r| (r.date, r.scheduled, r.actual));
    Ok(merged)
}

/// Merges the daily files of both directions from `data_dir` into
/// `merged_<direction>.csv` files under `output_dir`. Returns the written
/// paths.
pub fn merge_all(data_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for direction in Direction::ALL {
        let records = merge_daily(data_dir.as_ref(), direction)?;
        let path = output_dir.as_ref().join(merged_file_name(direction));
        write_records(&path, &records)?;
        info!(path = %path.display(), total_rows = records.len(), %direction, "Merged file written");
        written.push(path);
    }

    Ok(written)
}
