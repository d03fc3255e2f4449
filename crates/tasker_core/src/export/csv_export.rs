//! CSV export of the task table.
//!
//! # Responsibility
//! - Serialize every task to an RFC-4180 CSV file, header included.
//! - Keep the on-disk text format stable for downstream spreadsheet use.
//!
//! # Invariants
//! - Rows are written in the repository's list order.
//! - Timestamps are rendered as `YYYY-MM-DD HH:MM:SS`; an absent
//!   `completed_at` becomes an empty field, never a `null` placeholder.
//! - The destination is created (truncating any previous file) before any
//!   row is written; a bad target fails the export up front.

use crate::model::task::Task;
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

const CSV_HEADER: [&str; 6] = [
    "ID",
    "Title",
    "Description",
    "Done",
    "Created At",
    "Completed At",
];

/// Exported timestamp layout. Storage keeps fractional seconds; the CSV
/// contract truncates to whole seconds.
const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type ExportResult<T> = Result<T, ExportError>;

/// Failure modes of a CSV export.
#[derive(Debug)]
pub enum ExportError {
    /// The destination file could not be created or flushed.
    Target {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Task retrieval failed; propagated from the repository unchanged.
    Repo(RepoError),
    /// A record could not be written to the destination.
    Csv(csv::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Target { path, source } => {
                write!(f, "cannot write export target `{}`: {source}", path.display())
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Target { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<RepoError> for ExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Exports every task to a CSV file at `path`, overwriting any existing
/// file, and returns the number of data records written.
///
/// # Side effects
/// - Emits `csv_export` logging events with record count and duration.
pub fn export_csv<R: TaskRepository>(repo: &R, path: impl AsRef<Path>) -> ExportResult<usize> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=csv_export module=export status=start");

    match write_csv(repo, path) {
        Ok(count) => {
            info!(
                "event=csv_export module=export status=ok records={count} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(count)
        }
        Err(err) => {
            error!(
                "event=csv_export module=export status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn write_csv<R: TaskRepository>(repo: &R, path: &Path) -> ExportResult<usize> {
    let tasks = repo.list_tasks()?;

    let file = File::create(path).map_err(|source| ExportError::Target {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADER)?;

    for task in &tasks {
        writer.write_record(&task_record(task))?;
    }

    writer.flush().map_err(|source| ExportError::Target {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(tasks.len())
}

fn task_record(task: &Task) -> [String; 6] {
    [
        task.id.to_string(),
        task.title.clone(),
        task.description.clone(),
        task.done.to_string(),
        format_csv_timestamp(task.created_at),
        task.completed_at
            .map(format_csv_timestamp)
            .unwrap_or_default(),
    ]
}

fn format_csv_timestamp(value: chrono::NaiveDateTime) -> String {
    value.format(CSV_TIMESTAMP_FORMAT).to_string()
}
