pub mod loaders;
pub mod row;

pub use loaders::load_enrollment_rows;
pub use row::{AdmissionType, CellValue, EnrollmentRow};
