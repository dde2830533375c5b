//! Single-row dispatch - orchestration layer.
//!
//! Routes one row to the procedure for its admission type. Only New
//! Admission is fully automated; Promoted locates the student record and
//! stops; the remaining types are explicit no-ops so the skip shows up in
//! the run log instead of disappearing.

use anyhow::Result;
use tracing::info;

use crate::infrastructure::PortalPage;
use crate::models::{AdmissionType, EnrollmentRow};
use crate::workflow::{EnrollmentFlow, ProcessResult, RowCtx};

/// Process one row. Errors escaping this function are caught one level up
/// and recorded against the row; they never abort the batch.
pub async fn process_row<P: PortalPage>(
    page: &P,
    flow: &EnrollmentFlow<'_>,
    row: &EnrollmentRow,
    admission_type: AdmissionType,
    ctx: &RowCtx,
) -> Result<ProcessResult> {
    match admission_type {
        AdmissionType::NewAdmission => flow.new_admission(page, row, ctx).await,
        AdmissionType::Promoted => flow.promoted(page, ctx).await,
        AdmissionType::Retained
        | AdmissionType::Passout
        | AdmissionType::Dropout
        | AdmissionType::Tc => {
            info!(
                "[row {}] admission type '{}' has no automated procedure, skipping",
                ctx.row_number,
                admission_type.as_str()
            );
            Ok(ProcessResult::Skipped)
        }
    }
}
