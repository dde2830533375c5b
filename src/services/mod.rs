pub mod error_log;
pub mod transforms;

pub use error_log::ErrorLog;
