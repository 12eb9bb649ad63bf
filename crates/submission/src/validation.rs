use crate::error::ValidationError;
use model::{LicenseRequest, DOCTOR_ID, LICENSE_NUMBER};
use serde_json::{Map, Value};

/// License details taken from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseSubmission {
    pub license_number: String,
}

/// Read an invocation payload as a license request.
/// `None` if the event isn't shaped like a gateway request at all.
pub fn parse_request(event: Value) -> Option<LicenseRequest> {
    serde_json::from_value(event).ok()
}

/// The non-null `doctor_id` path parameter and raw body, if both are present.
/// The body is not inspected.
pub fn request_fields(request: &LicenseRequest) -> Option<(&str, &str)> {
    let doctor_id: &str = request.path_parameter(DOCTOR_ID)?;
    let body: &str = request.body.as_deref()?;

    Some((doctor_id, body))
}

/// Parse a body and pull out a non-null `license_number`.
///
/// Strings are taken verbatim, numbers as written and booleans as `True` or
/// `False`, the text existing records were stored with. Arrays and objects
/// keep their JSON text, which differs from how those records were written.
pub fn parse_license_body(body: &str) -> Result<LicenseSubmission, ValidationError> {
    let parsed: Value = serde_json::from_str(body).map_err(ValidationError::MalformedBody)?;
    let fields: &Map<String, Value> = parsed.as_object().ok_or(ValidationError::NotAnObject)?;

    let license_number: String = match fields.get(LICENSE_NUMBER) {
        None | Some(Value::Null) => return Err(ValidationError::MissingLicense),
        Some(Value::String(license_number)) => license_number.clone(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    };

    Ok(LicenseSubmission { license_number })
}
