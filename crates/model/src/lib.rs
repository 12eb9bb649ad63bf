pub mod env;
pub mod license;
pub mod request;

pub use license::{LicenseRecord, LicenseStatus};
pub use request::LicenseRequest;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Partition key of the license table.
pub const DOCTOR_ID: &str = "doctor_id";
/// Sort key of the license table.
pub const LICENSE_NUMBER: &str = "license_number";
