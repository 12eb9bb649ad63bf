use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{tracing, LambdaEvent};
use model::Error;
use serde_json::Value;

pub mod error;
pub mod handler;
pub mod response;
pub mod validation;

pub use error::{FailureKind, SubmissionError, ValidationError};
pub use handler::SubmissionHandler;

/// Handles one license submission event, designed for use with
/// `lambda_runtime::run(service_fn(...))`.
///
/// ```ignore
/// let handler: SubmissionHandler = SubmissionHandler::new(Arc::new(store));
///
/// lambda_runtime::run(service_fn(|event: SubmissionLambdaEvent| {
///     submission_fn(&handler, event)
/// }))
/// .await?;
/// ```
///
/// The payload is taken as raw JSON so that malformed events are still
/// answered with a response. Failures are reported in the returned
/// response, never as an `Err`.
pub async fn submission_fn(
    handler: &SubmissionHandler,
    event: SubmissionLambdaEvent,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request_id: String = event.context.request_id.clone();
    let invocation_span: Span =
        tracing::span!(tracing::Level::INFO, "License submission", request_id);

    async move {
        tracing::info!(
            resource = event_field(&event.payload, "resource"),
            path = event_field(&event.payload, "path"),
            "Handling license submission"
        );

        let response: ApiGatewayProxyResponse = handler.handle_event(event.payload).await;

        tracing::info!(status_code = response.status_code, "Finished license submission");

        Ok(response)
    }
    .instrument(invocation_span)
    .await
}

fn event_field<'a>(payload: &'a Value, name: &str) -> &'a str {
    payload.get(name).and_then(Value::as_str).unwrap_or_default()
}

pub type SubmissionLambdaEvent = LambdaEvent<Value>;
