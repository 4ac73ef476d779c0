//! Report generation
//!
//! Records are first assembled into a [`Table`] (header plus string rows,
//! multi-valued fields joined with newlines inside one cell) and then
//! written out as CSV under a timestamped file name.

mod table;
mod writer;

pub use table::{assemble_members, assemble_projects, Table, MEMBER_HEADER, PROJECT_HEADER};
pub use writer::{report_filename, write_csv, write_report, TIMESTAMP_FORMAT};

use thiserror::Error;

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
