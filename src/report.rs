//! Per-frame report output.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use crate::{classifier::MouthState, pipeline::Measurement, Result};

/// A processed frame as reported to sinks and kept in the session history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    /// Frame sequence number
    pub sequence: u64,
    /// Capture time relative to the start of the stream
    pub captured_at: Duration,
    /// Pipeline output for the frame
    pub measurement: Measurement,
}

impl FrameRecord {
    /// Classified state
    #[must_use]
    pub fn state(&self) -> MouthState {
        self.measurement.state
    }
}

impl fmt::Display for FrameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAR: {:.3}, Avg: {:.3}, State: {}",
            self.measurement.raw_mar, self.measurement.smoothed_mar, self.measurement.state
        )
    }
}

/// Receives one record per processed frame
pub trait ReportSink {
    /// Emit a record
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written
    fn emit(&mut self, record: &FrameRecord) -> Result<()>;
}

/// Writes one line per record to any writer (stdout in the binary)
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    /// Wrap a writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleSink<std::io::Stdout> {
    /// Sink writing to standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        writeln!(self.out, "{record}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records in emission order
    pub records: Vec<FrameRecord>,
}

impl ReportSink for MemorySink {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit(&mut self, record: &FrameRecord) -> Result<()> {
        (**self).emit(record)
    }
}
