//! ATP wire format: line-delimited JSON, one request per line, one
//! response per line.
//!
//! Request:  `{"tool": "<name>", "arguments": {...}}`
//! Success:  `{"result": <value>}`
//! Error:    `{"error": {"kind": "<kind>", "message": "<text>"}}`

use serde::{Deserialize, Serialize};

use org_graph_core::error::{CoreError, ErrorKind};

/// One tool invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct AtpRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Wire-level error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtpError {
    pub kind: ErrorKind,
    pub message: String,
    /// Per-item detail for rejected batches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
}

/// One tool response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtpResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AtpError>,
}

impl AtpResponse {
    pub fn success(result: serde_json::Value) -> Self {
        AtpResponse {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        AtpResponse {
            result: None,
            error: Some(AtpError {
                kind,
                message: message.into(),
                items: None,
            }),
        }
    }
}

impl From<CoreError> for AtpResponse {
    fn from(error: CoreError) -> Self {
        let kind = error.kind();
        match error {
            // Programmer errors surface generically, never with internals.
            CoreError::Internal(_) => AtpResponse::failure(kind, "Internal error"),
            CoreError::BatchRejected { errors } => AtpResponse {
                result: None,
                error: Some(AtpError {
                    kind,
                    message: format!("Batch rejected: {} item(s) failed validation", errors.len()),
                    items: serde_json::to_value(errors).ok(),
                }),
            },
            other => AtpResponse::failure(kind, other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::error::BatchItemError;

    #[test]
    fn request_parses_with_and_without_arguments() {
        let req: AtpRequest =
            serde_json::from_str(r#"{"tool": "get_statistics"}"#).unwrap();
        assert_eq!(req.tool, "get_statistics");
        assert!(req.arguments.is_null());

        let req: AtpRequest =
            serde_json::from_str(r#"{"tool": "get_entity", "arguments": {"id": "x"}}"#).unwrap();
        assert_eq!(req.arguments["id"], "x");
    }

    #[test]
    fn success_and_error_are_mutually_exclusive_on_the_wire() {
        let ok = serde_json::to_value(AtpResponse::success(serde_json::json!(1))).unwrap();
        assert!(ok.get("error").is_none());
        let err = serde_json::to_value(AtpResponse::failure(
            ErrorKind::NotFound,
            "Entity not found",
        ))
        .unwrap();
        assert!(err.get("result").is_none());
        assert_eq!(err["error"]["kind"], "not_found");
    }

    #[test]
    fn internal_errors_are_surfaced_generically() {
        let response: AtpResponse =
            CoreError::Internal("index out of bounds at memory.rs:42".into()).into();
        assert_eq!(response.error.unwrap().message, "Internal error");
    }

    #[test]
    fn batch_rejection_carries_per_item_report() {
        let response: AtpResponse = CoreError::BatchRejected {
            errors: vec![BatchItemError {
                index: 1,
                error: "bad edge".into(),
            }],
        }
        .into();
        let error = response.error.unwrap();
        assert_eq!(error.kind, ErrorKind::BatchRejected);
        assert_eq!(error.items.unwrap()[0]["index"], 1);
    }
}
