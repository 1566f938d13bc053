//! Output writers for normalized records.
//!
//! Records leave the process as CSV, one flushed line per record, either
//! on stdout or appended to a file.

pub mod csv;

// Re-export main types
pub use self::csv::{open_sink, BoxedSink, CsvSink};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
