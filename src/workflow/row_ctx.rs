//! Row processing context.
//!
//! Captures "which row am I working on" for logging and error tagging.

use std::fmt::Display;

/// Context for one row's walk through the portal.
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// The row's GR NO, tagged onto every error record.
    pub gr_no: String,

    /// 1-based spreadsheet row number, for log display only.
    pub row_number: usize,
}

impl RowCtx {
    pub fn new(gr_no: String, row_number: usize) -> Self {
        Self { gr_no, row_number }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} (GR NO {})", self.row_number, self.gr_no)
    }
}
