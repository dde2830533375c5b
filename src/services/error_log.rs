//! Error log sink - services layer.
//!
//! Append-only file of timestamped failure lines, one per failed
//! operation. Written, never read back; operators use it to re-enter the
//! flagged fields by hand.

use std::fs::OpenOptions;
use std::io::Write;

use tracing::error;

use crate::error::{ErrorCode, ErrorRecord};

/// The append-only error sink. Constructed once per run and passed by
/// reference; opening the file per write keeps the handle out of the
/// long-lived state.
pub struct ErrorLog {
    path: String,
}

impl ErrorLog {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Append one record, mirrored to the console log. Sink failures are
    /// reported on the console only; they never interrupt the run.
    pub fn record(&self, code: ErrorCode, message: impl Into<String>, gr_no: Option<&str>) {
        self.write(&ErrorRecord::new(code, message, gr_no));
    }

    pub fn write(&self, record: &ErrorRecord) {
        error!("{}", record);
        if let Err(e) = self.append(record) {
            error!("could not append to {}: {}", self.path, e);
        }
    }

    fn append(&self, record: &ErrorRecord) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(
            file,
            "{} - ERROR - {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record
        )
    }
}
