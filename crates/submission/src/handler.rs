use crate::error::{FailureKind, SubmissionError};
use crate::response::{error_response, ok_response};
use crate::validation::{parse_license_body, parse_request, request_fields, LicenseSubmission};
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lambda_runtime::tracing;
use model::{LicenseRecord, LicenseRequest, DOCTOR_ID};
use serde_json::Value;
use state::LicenseStore;
use std::sync::Arc;

/// Accepts license submissions, stores them and answers with the stored record.
#[derive(Clone)]
pub struct SubmissionHandler {
    store: Arc<dyn LicenseStore>,
}

impl SubmissionHandler {
    pub fn new(store: Arc<dyn LicenseStore>) -> Self {
        SubmissionHandler { store }
    }

    /// Handle a raw invocation payload. Events that aren't shaped like a
    /// gateway request are answered as a precondition failure.
    pub async fn handle_event(&self, event: Value) -> ApiGatewayProxyResponse {
        match parse_request(event) {
            Some(request) => self.handle(&request).await,
            None => respond(Err(SubmissionError::PreconditionFailed)),
        }
    }

    /// Handle a request end to end. Every outcome, including failures,
    /// is returned as a response.
    pub async fn handle(&self, request: &LicenseRequest) -> ApiGatewayProxyResponse {
        let result: Result<ApiGatewayProxyResponse, SubmissionError> = self
            .submit(request)
            .await
            .and_then(|record| ok_response(&record).map_err(SubmissionError::from));

        respond(result)
    }

    /// Validate the request, persist the derived record and read it back.
    pub async fn submit(
        &self,
        request: &LicenseRequest,
    ) -> Result<LicenseRecord, SubmissionError> {
        let (doctor_id, body): (&str, &str) =
            request_fields(request).ok_or(SubmissionError::PreconditionFailed)?;

        let submission: LicenseSubmission = parse_license_body(body)?;
        let record: LicenseRecord = LicenseRecord::new(doctor_id, submission.license_number);

        tracing::info!(
            doctor_id,
            license_number = record.license_number,
            status = %record.status,
            "Storing license submission"
        );

        // A failed write stops here, nothing is read back
        self.store.insert(&record).await?;

        let persisted: LicenseRecord = self.store.get(DOCTOR_ID, doctor_id).await?;

        tracing::info!(record_key = persisted.record_key(), "Read back license record");

        Ok(persisted)
    }
}

fn respond(result: Result<ApiGatewayProxyResponse, SubmissionError>) -> ApiGatewayProxyResponse {
    result.unwrap_or_else(|err| {
        let kind: FailureKind = err.kind();

        match kind {
            FailureKind::PreconditionFailed => {
                tracing::warn!(status_code = kind.status_code(), "Rejected submission: {err}")
            }
            FailureKind::InternalError => {
                tracing::error!(status_code = kind.status_code(), "Failed submission: {err}")
            }
        }

        error_response(kind, &err.message())
    })
}
