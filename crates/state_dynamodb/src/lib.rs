use async_trait::async_trait;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::operation::query::{QueryError, QueryOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use lambda_runtime::tracing;
use model::env::LicenseTableConfig;
use model::LicenseRecord;
use state::StoreErrorReason::{BackendFailure, BadRecord, MissingEntry};
use state::StoreOperation::{Get, Insert};
use state::{LicenseStore, StoreError};
use std::collections::HashMap;

const KEY_NAME_PLACEHOLDER: &str = "#key";
const KEY_VALUE_PLACEHOLDER: &str = ":value";

/// License records in a DynamoDB table with `doctor_id` as the hash key
/// and `license_number` as the range key.
pub struct DynamoDbLicenseStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
    consistent_read: bool,
}

impl DynamoDbLicenseStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, config: LicenseTableConfig) -> Self {
        DynamoDbLicenseStore {
            table_name: config.table_name,
            dynamodb_client,
            consistent_read: config.consistent_read,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn put_item(
        &self,
        item: HashMap<String, AttributeValue>,
    ) -> Result<PutItemOutput, SdkError<PutItemError, HttpResponse>> {
        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
    }

    async fn query_partition(
        &self,
        key_name: &str,
        key_value: &str,
    ) -> Result<QueryOutput, SdkError<QueryError, HttpResponse>> {
        self.dynamodb_client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(format!("{KEY_NAME_PLACEHOLDER} = {KEY_VALUE_PLACEHOLDER}"))
            .expression_attribute_names(KEY_NAME_PLACEHOLDER, key_name)
            .expression_attribute_values(
                KEY_VALUE_PLACEHOLDER,
                AttributeValue::S(key_value.to_string()),
            )
            .consistent_read(self.consistent_read)
            .limit(1)
            .send()
            .await
    }
}

#[async_trait]
impl LicenseStore for DynamoDbLicenseStore {
    async fn insert(&self, record: &LicenseRecord) -> Result<(), StoreError> {
        let record_key: String = record.record_key();

        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(record)
            .map_err(|err| StoreError::new(record_key.clone(), Insert, BadRecord(err.to_string())))?;

        tracing::debug!(table = self.table_name, record_key, "Putting license record");

        self.put_item(item).await.map_err(|err| {
            StoreError::new(
                record_key.clone(),
                Insert,
                BackendFailure(DisplayErrorContext(&err).to_string().into()),
            )
        })?;

        Ok(())
    }

    async fn get(&self, key_name: &str, key_value: &str) -> Result<LicenseRecord, StoreError> {
        tracing::debug!(table = self.table_name, key_name, key_value, "Querying license records");

        let output: QueryOutput = self
            .query_partition(key_name, key_value)
            .await
            .map_err(|err| {
                StoreError::new(
                    key_value.to_string(),
                    Get,
                    BackendFailure(DisplayErrorContext(&err).to_string().into()),
                )
            })?;

        let item: HashMap<String, AttributeValue> = output
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::new(key_value.to_string(), Get, MissingEntry))?;

        serde_dynamo::from_item(item)
            .map_err(|err| StoreError::new(key_value.to_string(), Get, BadRecord(err.to_string())))
    }
}
