use async_trait::async_trait;
use model::LicenseRecord;
use thiserror::Error;

/// Persist license records and read them back by key.
///
/// A record is addressed by its composite key `(doctor_id, license_number)`.
/// Reads go through the partition key only and return the first matching
/// record in ascending sort key order.
#[async_trait]
pub trait LicenseStore: Send + Sync {
    /// Write a single record, replacing any record with the same composite key.
    async fn insert(&self, record: &LicenseRecord) -> Result<(), StoreError>;

    /// Fetch the first record whose `key_name` attribute equals `key_value`.
    async fn get(&self, key_name: &str, key_value: &str) -> Result<LicenseRecord, StoreError>;
}

/// Errors arising from reading or writing license records.
#[derive(Debug, Error)]
#[error("{operation:?} failed for {record_key}: {reason}")]
pub struct StoreError {
    pub record_key: String,

    pub operation: StoreOperation,
    pub reason: StoreErrorReason,
}

#[derive(Debug, Error)]
pub enum StoreErrorReason {
    // No record matched the requested key
    #[error("no matching record")]
    MissingEntry,
    // The record couldn't be converted to or from its stored form
    #[error("bad record, {0}")]
    BadRecord(String),
    // An error from the underlying store
    #[error("backend failure, {0}")]
    BackendFailure(model::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Insert,
    Get,
}

impl StoreError {
    pub fn new(record_key: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            record_key,
            operation,
            reason,
        }
    }
}
