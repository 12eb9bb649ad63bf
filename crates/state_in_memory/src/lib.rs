use async_trait::async_trait;
use model::LicenseRecord;
use state::StoreErrorReason::{BackendFailure, MissingEntry};
use state::StoreOperation::{Get, Insert};
use state::{LicenseStore, StoreError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

type RecordKey = (String, String);

/// License records held in process, ordered by composite key like a
/// DynamoDB table with a sort key.
#[derive(Clone, Default)]
pub struct InMemoryLicenseStore {
    records: Arc<Mutex<BTreeMap<RecordKey, LicenseRecord>>>,
}

impl InMemoryLicenseStore {
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
        record_key: &str,
        operation: state::StoreOperation,
    ) -> Result<MutexGuard<'_, BTreeMap<RecordKey, LicenseRecord>>, StoreError> {
        self.records.lock().map_err(|err| {
            StoreError::new(
                record_key.to_string(),
                operation,
                BackendFailure(err.to_string().into()),
            )
        })
    }
}

#[async_trait]
impl LicenseStore for InMemoryLicenseStore {
    async fn insert(&self, record: &LicenseRecord) -> Result<(), StoreError> {
        let key: RecordKey = (record.doctor_id.clone(), record.license_number.clone());

        self.lock(&record.record_key(), Insert)?
            .insert(key, record.clone());

        Ok(())
    }

    async fn get(&self, key_name: &str, key_value: &str) -> Result<LicenseRecord, StoreError> {
        self.lock(key_value, Get)?
            .values()
            .find(|record| record.attribute(key_name) == Some(key_value))
            .cloned()
            .ok_or_else(|| StoreError::new(key_value.to_string(), Get, MissingEntry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{LicenseStatus, DOCTOR_ID, LICENSE_NUMBER};
    use state::StoreErrorReason;

    #[tokio::test]
    async fn insert_then_get_by_doctor_id() {
        let store: InMemoryLicenseStore = InMemoryLicenseStore::default();

        store
            .insert(&LicenseRecord::new("123", "234353-verif"))
            .await
            .expect("Insert should succeed");

        let record: LicenseRecord = store
            .get(DOCTOR_ID, "123")
            .await
            .expect("Record should exist in store");

        assert_eq!("123", record.doctor_id);
        assert_eq!("234353-verif", record.license_number);
        assert_eq!(LicenseStatus::Verified, record.status);
    }

    #[tokio::test]
    async fn get_missing_doctor_fails() {
        let store: InMemoryLicenseStore = InMemoryLicenseStore::default();

        let err: StoreError = store
            .get(DOCTOR_ID, "missing")
            .await
            .expect_err("Nothing has been stored");

        assert!(matches!(err.reason, StoreErrorReason::MissingEntry));
        assert_eq!("missing", err.record_key);
    }

    #[tokio::test]
    async fn composite_key_keeps_each_license() {
        let store: InMemoryLicenseStore = InMemoryLicenseStore::default();

        store.insert(&LicenseRecord::new("123", "b-rej")).await.unwrap();
        store.insert(&LicenseRecord::new("123", "a-verif")).await.unwrap();
        store.insert(&LicenseRecord::new("456", "c")).await.unwrap();

        assert_eq!(3, store.len());

        // First record in sort key order
        let record: LicenseRecord = store.get(DOCTOR_ID, "123").await.unwrap();
        assert_eq!("a-verif", record.license_number);

        let record: LicenseRecord = store.get(LICENSE_NUMBER, "b-rej").await.unwrap();
        assert_eq!(LicenseStatus::Rejected, record.status);
    }

    #[tokio::test]
    async fn same_composite_key_is_replaced() {
        let store: InMemoryLicenseStore = InMemoryLicenseStore::default();

        store.insert(&LicenseRecord::new("123", "234353")).await.unwrap();
        store.insert(&LicenseRecord::new("123", "234353")).await.unwrap();

        assert_eq!(1, store.len());
    }
}
