use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The parts of an API Gateway proxy event the license route reads.
///
/// Every field may be absent or null so that a malformed event still
/// reaches validation instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LicenseRequest {
    pub resource: Option<String>,
    pub path: Option<String>,
    pub http_method: Option<String>,
    pub path_parameters: Option<HashMap<String, Option<String>>>,
    pub body: Option<String>,
}

impl LicenseRequest {
    /// A non-null path parameter.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.as_ref()?.get(name)?.as_deref()
    }
}
