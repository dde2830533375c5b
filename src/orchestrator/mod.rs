//! Orchestration layer.
//!
//! ## Responsibilities
//!
//! - `batch_processor` - application lifecycle: reachability preflight,
//!   browser session, login, the row loop, final statistics, and closing
//!   the session on every exit path
//! - `row_processor` - admission-type dispatch for a single row
//!
//! ## Layering
//!
//! ```text
//! batch_processor (Vec<EnrollmentRow>, owns Browser + PortalDriver)
//!     ↓
//! row_processor (one EnrollmentRow, picks the procedure)
//!     ↓
//! workflow::EnrollmentFlow (the field sequence)
//!     ↓
//! services (transforms / error log)
//!     ↓
//! infrastructure (PortalDriver)
//! ```

pub mod batch_processor;
pub mod row_processor;

pub use batch_processor::{login, run_batch, App, BatchStats};
pub use row_processor::process_row;
