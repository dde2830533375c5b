//! # EMIS Form Filler
//!
//! Batch data entry into the EMIS student-enrollment portal: reads rows
//! from an Excel sheet and drives a Chromium session to replicate the
//! manual form-filling walk, one row at a time.
//!
//! ## Architecture
//!
//! The crate is layered, with each layer only depending on the one below:
//!
//! ### ① Infrastructure
//! - `infrastructure/` - owns the scarce resource (the portal `Page`) and
//!   exposes capabilities only
//! - `PortalDriver` - the sole page owner: navigate / click / fill /
//!   select-option / upload-file / settle
//!
//! ### ② Services
//! - `services/` - single-field capabilities, no knowledge of the row walk
//! - `transforms` - pure cell-to-form-value conversions
//! - `ErrorLog` - the append-only `process_log.txt` sink
//!
//! ### ③ Workflow
//! - `workflow/` - the complete procedure for one spreadsheet row
//! - `RowCtx` - context ("which GR NO, which row index")
//! - `EnrollmentFlow` - field sequence with per-field failure isolation
//!
//! ### ④ Orchestration
//! - `orchestrator/batch_processor` - session lifecycle, login, row loop
//! - `orchestrator/row_processor` - admission-type dispatch for one row

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

pub use config::Config;
pub use error::{DriverError, ErrorCode, ErrorRecord};
pub use infrastructure::{PortalDriver, PortalPage};
pub use models::{AdmissionType, CellValue, EnrollmentRow};
pub use orchestrator::App;
pub use services::ErrorLog;
pub use workflow::{EnrollmentFlow, ProcessResult, RowCtx};
