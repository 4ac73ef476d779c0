use super::{ReportResult, Table};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Timestamp format used in report file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// File name for a report, e.g. `projects_2024-01-09_08-30-00.csv`
pub fn report_filename(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}.csv", prefix, at.format(TIMESTAMP_FORMAT))
}

/// Writes `table` as CSV to `path`, header first
pub fn write_csv(table: &Table, path: &Path) -> ReportResult<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(&table.header)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes `table` into `directory` under a timestamped name and returns the path
///
/// The directory is created if needed.
pub fn write_report(
    table: &Table,
    directory: &Path,
    prefix: &str,
    at: DateTime<Utc>,
) -> ReportResult<PathBuf> {
    std::fs::create_dir_all(directory)?;

    let path = directory.join(report_filename(prefix, at));
    write_csv(table, &path)?;

    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}
