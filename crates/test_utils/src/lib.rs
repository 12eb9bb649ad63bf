use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::operation::query::QueryOutput;
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_smithy_mocks::{mock, mock_client, Rule, RuleMode};
use model::env::LICENSE_TABLE_NAME;
use model::{LicenseRecord, LicenseRequest, DOCTOR_ID};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Test table name
pub const TEST_TABLE: &str = "doctor-license-details";

/// Resource path the API Gateway route is mounted on
pub const LICENSE_RESOURCE: &str = "/doctor/{doctor_id}/license";

/// Create an API Gateway request for the license route.
/// A `None` doctor id or body leaves that part out of the request.
pub fn license_request(doctor_id: Option<&str>, body: Option<&str>) -> LicenseRequest {
    let mut request: LicenseRequest = LicenseRequest {
        resource: Some(LICENSE_RESOURCE.to_string()),
        http_method: Some("POST".to_string()),
        body: body.map(str::to_string),
        ..Default::default()
    };

    if let Some(doctor_id) = doctor_id {
        request.path = Some(format!("/doctor/{doctor_id}/license"));
        request.path_parameters = Some(HashMap::from([(
            DOCTOR_ID.to_string(),
            Some(doctor_id.to_string()),
        )]));
    }

    request
}

/// The same request as the raw JSON payload Lambda delivers.
pub fn license_event(doctor_id: Option<&str>, body: Option<&str>) -> Value {
    serde_json::to_value(license_request(doctor_id, body))
        .expect("Test request should convert to JSON")
}

/// Request body as a client would send it, pretty printed with a trailing space.
pub fn license_body(license_number: &str) -> String {
    format!("{{\n    \"license_number\": \"{license_number}\" \n}}")
}

/// Text body of a response, empty if there is none.
pub fn response_body(response: &ApiGatewayProxyResponse) -> String {
    match &response.body {
        Some(Body::Text(text)) => text.clone(),
        Some(Body::Binary(bytes)) => String::from_utf8_lossy(bytes).to_string(),
        Some(Body::Empty) | None => String::new(),
    }
}

/// A mock DynamoDB client accepting one put and answering one query.
/// The query returns `record` as its only item, or no items if `None`.
pub fn create_mock_dynamodb_client(record: Option<&LicenseRecord>) -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|req| req.table_name() == Some(TEST_TABLE))
        .then_output(|| PutItemOutput::builder().build());

    let item: Option<HashMap<String, AttributeValue>> = record.map(|record| {
        serde_dynamo::to_item(record).expect("Test record should convert to an item")
    });

    let query_rule: Rule = mock!(aws_sdk_dynamodb::Client::query)
        .match_requests(|req| req.table_name() == Some(TEST_TABLE))
        .then_output(move || {
            let output = QueryOutput::builder();

            match item.clone() {
                Some(item) => output.items(item).count(1).build(),
                None => output.count(0).build(),
            }
        });

    mock_client!(
        aws_sdk_dynamodb,
        RuleMode::MatchAny,
        [&put_item_rule, &query_rule]
    )
}

/// A mock DynamoDB client whose puts fail as if the table doesn't exist.
pub fn create_failing_put_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .then_error(|| {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });

    mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, [&put_item_rule])
}

/// Setup default environment variables used in testing
pub fn setup_default_env() {
    env::set_var(LICENSE_TABLE_NAME, TEST_TABLE);
}
