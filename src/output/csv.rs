//! CSV record sink.
//!
//! Every field is quoted, absent fields are empty strings and each record is
//! flushed as soon as it is written so tailing readers see it immediately.

use super::validate_path;
use crate::parser::schema::NormalizedRecord;
use crate::utils::config::CSV_COLUMNS;
use crate::utils::error::OutputError;
use csv::{QuoteStyle, Writer, WriterBuilder};
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Append-only, ordered CSV writer flushed per record
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    rows_written: u64,
}

impl<W: Write> CsvSink<W> {
    /// Wrap any writer
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(inner);

        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Write the column header line
    pub fn write_header(&mut self) -> Result<(), OutputError> {
        self.writer.write_record(CSV_COLUMNS)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write and flush one record
    pub fn write_record(&mut self, record: &NormalizedRecord) -> Result<(), OutputError> {
        self.writer.write_record(record.to_fields())?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of records written so far (header excluded)
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, OutputError> {
        self.writer
            .into_inner()
            .map_err(|e| OutputError::WriteFailed(e.into_error()))
    }
}

/// Boxed sink used by the commands: stdout or an appended file
pub type BoxedSink = CsvSink<Box<dyn Write + Send>>;

/// Open the output sink
///
/// **Public** - main entry point for CSV output
///
/// # Arguments
/// * `output_path` - File to append to; `None` writes to stdout
/// * `header` - Write the column header line once after opening
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - File cannot be opened or written
pub fn open_sink(output_path: Option<&Path>, header: bool) -> Result<BoxedSink, OutputError> {
    let inner: Box<dyn Write + Send> = match output_path {
        Some(path) => {
            validate_path(path)?;

            // Create parent directories if needed
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    debug!("Creating parent directories: {}", parent.display());
                    std::fs::create_dir_all(parent).map_err(|e| {
                        OutputError::InvalidPath(format!(
                            "Cannot create directory {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }

            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(OutputError::WriteFailed)?;

            info!("Appending records to: {}", path.display());
            Box::new(file)
        }
        None => {
            debug!("Writing records to stdout");
            Box::new(std::io::stdout())
        }
    };

    let mut sink = CsvSink::new(inner);
    if header {
        sink.write_header()?;
    }
    Ok(sink)
}
