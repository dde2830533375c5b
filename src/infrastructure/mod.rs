//! Infrastructure layer: owns the portal page, exposes capabilities.

pub mod portal_driver;

pub use portal_driver::{PortalDriver, PortalPage};
