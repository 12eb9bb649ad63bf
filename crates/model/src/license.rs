use crate::{DOCTOR_ID, LICENSE_NUMBER};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Marker in a license number for a license confirmed by the issuing authority.
const VERIFIED_MARKER: &str = "-verif";
/// Marker in a license number for a license the authority refused.
const REJECTED_MARKER: &str = "-rej";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LicenseStatus {
    Verified,
    Rejected,
    Pending,
}

impl LicenseStatus {
    /// Derive a status from the literal content of a license number.
    ///
    /// Matching is case-sensitive and the verified marker takes priority,
    /// so `"1-rej-verif"` is still `Verified`.
    pub fn classify(license_number: &str) -> Self {
        if license_number.contains(VERIFIED_MARKER) {
            LicenseStatus::Verified
        } else if license_number.contains(REJECTED_MARKER) {
            LicenseStatus::Rejected
        } else {
            LicenseStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseStatus::Verified => "Verified",
            LicenseStatus::Rejected => "Rejected",
            LicenseStatus::Pending => "Pending",
        }
    }
}

impl Display for LicenseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doctor's license submission as persisted in the license table.
/// Keyed by `doctor_id` (partition) and `license_number` (sort).
///
/// Field order is also the serialized key order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LicenseRecord {
    pub doctor_id: String,
    pub license_number: String,
    pub status: LicenseStatus,
}

impl LicenseRecord {
    /// Build a record, deriving the status from the license number.
    pub fn new(doctor_id: impl Into<String>, license_number: impl Into<String>) -> Self {
        let license_number: String = license_number.into();
        let status: LicenseStatus = LicenseStatus::classify(&license_number);

        LicenseRecord {
            doctor_id: doctor_id.into(),
            license_number,
            status,
        }
    }

    /// Look up a key attribute by its table attribute name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            DOCTOR_ID => Some(&self.doctor_id),
            LICENSE_NUMBER => Some(&self.license_number),
            _ => None,
        }
    }

    /// Composite key rendered for logs and error messages.
    pub fn record_key(&self) -> String {
        format!("{}/{}", self.doctor_id, self.license_number)
    }
}
