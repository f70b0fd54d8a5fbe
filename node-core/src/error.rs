use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error response from the API.
///
/// This is the failure shape of an apimachinery `Status` object.
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// The status
    pub status: String,
    /// A message about the error
    #[serde(default)]
    pub message: String,
    /// The reason for the error
    #[serde(default)]
    pub reason: String,
    /// The error code
    pub code: u16,
    /// Extended data associated with the reason.
    /// Each reason may define its own extended details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<StatusDetails>,
}

impl ErrorResponse {
    /// Whether the server reported that the object does not exist
    ///
    /// Only the `NotFound` reason counts. A bare 404 from something in front of the
    /// apiserver, like a proxy with the wrong path, does not.
    pub fn is_not_found(&self) -> bool {
        self.reason == "NotFound"
    }

    /// Whether the server rejected a write because of a stale `resourceVersion`
    pub fn is_conflict(&self) -> bool {
        self.reason == "Conflict"
    }
}

/// StatusDetails is a set of additional properties that MAY be set by the server
/// to provide additional information about a response.
/// The Reason field of a Status object defines what attributes will be set.
/// Clients must ignore fields that do not match the defined type of each attribute,
/// and should assume that any attribute may be empty, invalid, or under defined.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    /// The Causes array includes more details associated with the StatusReason failure.
    /// Not all StatusReasons may provide detailed causes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causes: Option<Vec<StatusCause>>,

    /// The group attribute of the resource associated with the status StatusReason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// The kind attribute of the resource associated with the status StatusReason.
    /// On some operations may differ from the requested resource Kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// The name attribute of the resource associated with the status StatusReason
    /// (when there is a single name which can be described).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// If specified, the time in seconds before the operation should be retried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<i32>,

    /// UID of the resource (when there is a single resource which can be described).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
}

/// StatusCause provides more information about a Status failure,
/// including cases when multiple errors are encountered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCause {
    /// The field of the resource that has caused this error, as named by its JSON serialization.
    ///
    /// Examples:
    ///   "name" - the field "name" on the current resource
    ///   "items\[0\].name" - the field "name" on the first array entry in "items"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// A human-readable description of the cause of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// A machine-readable description of the cause of the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVALID: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "InstanceDeployment.node.sapcloud.io \"web\" is invalid: spec.replicas: Invalid value: -1: must be greater than or equal to 0",
      "reason": "Invalid",
      "details": {
        "name": "web",
        "group": "node.sapcloud.io",
        "kind": "InstanceDeployment",
        "causes": [
          {
            "reason": "FieldValueInvalid",
            "message": "Invalid value: -1: must be greater than or equal to 0",
            "field": "spec.replicas"
          }
        ]
      },
      "code": 422
    }
    "#;

    const NOT_FOUND: &str = r#"
    {
      "kind": "Status",
      "apiVersion": "v1",
      "metadata": {},
      "status": "Failure",
      "message": "instancedeployments.node.sapcloud.io \"web\" not found",
      "reason": "NotFound",
      "details": { "name": "web", "group": "node.sapcloud.io", "kind": "instancedeployments" },
      "code": 404
    }
    "#;

    #[test]
    fn invalid_status() {
        let status: ErrorResponse = serde_json::from_str(INVALID).unwrap();
        assert_eq!(status.code, 422);
        assert!(!status.is_not_found());
        let details = status.details.unwrap();
        assert_eq!(details.name.as_deref(), Some("web"));
        let causes = details.causes.unwrap();
        assert_eq!(causes[0].field.as_deref(), Some("spec.replicas"));
    }

    #[test]
    fn not_found_status() {
        let status: ErrorResponse = serde_json::from_str(NOT_FOUND).unwrap();
        assert!(status.is_not_found());
        assert!(!status.is_conflict());
        assert_eq!(
            status.to_string(),
            "instancedeployments.node.sapcloud.io \"web\" not found: NotFound"
        );
    }

    #[test]
    fn minimal_status() {
        let status: ErrorResponse =
            serde_json::from_str(r#"{"status": "Failure", "code": 409, "reason": "Conflict"}"#).unwrap();
        assert!(status.is_conflict());
        assert_eq!(status.message, "");
        assert!(status.details.is_none());
    }

    #[test]
    fn bare_404_is_not_a_missing_object() {
        let status = ErrorResponse {
            status: "404 Not Found".into(),
            message: "\"404 page not found\"".into(),
            reason: "Failed to parse error data".into(),
            code: 404,
            details: None,
        };
        assert!(!status.is_not_found());
    }
}
