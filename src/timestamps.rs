//! The `frame_timestamps.csv` log.
//!
//! One header row `filename,timestamp`, then one row per written image in
//! decode order. Timestamps carry exactly six decimals.

use std::{fs::File, path::Path};

use csv::{Terminator, Writer, WriterBuilder};

use crate::{error::FrameStampError, utilities};

/// File name of the CSV written into the output folder.
pub const TIMESTAMP_FILE_NAME: &str = "frame_timestamps.csv";

const HEADER: [&str; 2] = ["filename", "timestamp"];

/// Writer for the filename → timestamp CSV.
pub struct TimestampLog {
    writer: Writer<File>,
    rows: u64,
}

impl TimestampLog {
    /// Create (or truncate) the CSV at `path` and write its header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, FrameStampError> {
        let terminator = if cfg!(windows) {
            Terminator::CRLF
        } else {
            Terminator::Any(b'\n')
        };
        let mut writer = WriterBuilder::new()
            .terminator(terminator)
            .from_path(path)?;
        writer.write_record(HEADER)?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append one `filename,timestamp` row.
    pub fn record(&mut self, filename: &str, seconds: f64) -> Result<(), FrameStampError> {
        self.writer
            .write_record([filename, utilities::format_timestamp(seconds).as_str()])?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush buffered rows to disk.
    pub fn finish(mut self) -> Result<u64, FrameStampError> {
        self.writer.flush()?;
        Ok(self.rows)
    }
}
