//! Error codes, log records and the browser-capability error type.

use std::fmt;

use thiserror::Error;

/// Fixed error codes, one per failure class.
///
/// The codes are stable identifiers: operators grep the error log for them
/// to find the rows that need manual re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    LoginFailed,
    NavigationFailed,
    ExcelReadError,
    DropdownError,
    InputError,
    DateFormatError,
    ElementNotFound,
    NetworkError,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::LoginFailed => "E001",
            ErrorCode::NavigationFailed => "E002",
            ErrorCode::ExcelReadError => "E003",
            ErrorCode::DropdownError => "E004",
            ErrorCode::InputError => "E005",
            ErrorCode::DateFormatError => "E006",
            ErrorCode::ElementNotFound => "E007",
            ErrorCode::NetworkError => "E008",
            ErrorCode::Unknown => "E999",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured failure entry: written to the error log, never read back.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub code: ErrorCode,
    pub message: String,
    /// The row's GR NO, when the failure is attributable to a row.
    pub gr_no: Option<String>,
}

impl ErrorRecord {
    pub fn new(code: ErrorCode, message: impl Into<String>, gr_no: Option<&str>) -> Self {
        Self {
            code,
            message: message.into(),
            gr_no: gr_no.map(str::to_string),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(gr_no) = &self.gr_no {
            write!(f, " (GR NO: {})", gr_no)?;
        }
        Ok(())
    }
}

/// Failures raised by a [`PortalPage`](crate::infrastructure::PortalPage)
/// backend. The workflow layer maps these onto the fixed [`ErrorCode`]s.
#[derive(Debug, Error)]
pub enum DriverError {
    /// No element matched the locator.
    #[error("element not found: {locator}")]
    NotFound { locator: String },

    /// A bounded wait elapsed before the condition held.
    #[error("timed out after {waited_ms}ms waiting for {what}")]
    Timeout { what: String, waited_ms: u64 },

    /// Page navigation failed.
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// A CDP command or script evaluation failed.
    #[error("browser command failed: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// A script produced a value the caller could not decode.
    #[error("could not decode script result: {0}")]
    Decode(#[from] serde_json::Error),

    /// Attaching a file to an upload control failed.
    #[error("file upload of {path} failed: {source}")]
    Upload {
        path: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
}
