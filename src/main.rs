use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, tracing};
use model::env::LicenseTableConfig;
use model::Error;
use state_dynamodb::DynamoDbLicenseStore;
use std::sync::Arc;
use submission::{submission_fn, SubmissionHandler, SubmissionLambdaEvent};

fn license_handler(
    dynamodb_client: aws_sdk_dynamodb::Client,
    config: LicenseTableConfig,
) -> SubmissionHandler {
    SubmissionHandler::new(Arc::new(DynamoDbLicenseStore::new(dynamodb_client, config)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config: LicenseTableConfig = LicenseTableConfig::from_env()?;

    tracing::info!(
        table = config.table_name,
        consistent_read = config.consistent_read,
        "Starting doctor license handler"
    );

    let dynamodb_client: aws_sdk_dynamodb::Client = aws_sdk_dynamodb::Client::new(
        &aws_config::load_defaults(BehaviorVersion::latest()).await,
    );
    let handler: SubmissionHandler = license_handler(dynamodb_client, config);
    let handler_ref: &SubmissionHandler = &handler;

    lambda_runtime::run(service_fn(move |event: SubmissionLambdaEvent| async move {
        submission_fn(handler_ref, event).await
    }))
    .await
}
