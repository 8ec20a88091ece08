//! Error types for org-graph-core.
//!
//! [`CoreError`] is the single error type used across the workspace. Every
//! variant maps onto one of the eight wire-level [`ErrorKind`]s surfaced by
//! the tool dispatcher, so adapters never need their own taxonomy.

use thiserror::Error;

/// Result alias used throughout the workspace.
pub type CoreResult<T> = Result<T, CoreError>;

/// A single failed item inside a rejected batch write.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BatchItemError {
    /// Zero-based index of the failing item in the submitted batch.
    pub index: usize,
    /// Human-readable reason the item was rejected.
    pub error: String,
}

/// Top-level error type for all graph operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested entity does not exist in the graph.
    #[error("Entity not found: {id}")]
    EntityNotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// A requested relationship does not exist in the graph.
    #[error("Relationship not found: {id}")]
    RelationshipNotFound {
        /// The id that failed to resolve.
        id: String,
    },

    /// An insert collided with an existing entity or relationship id.
    #[error("Id collision: '{id}' already exists")]
    IdCollision {
        /// The duplicated id.
        id: String,
    },

    /// A relationship type is unknown or otherwise outside the catalog.
    #[error("Schema violation: {message}")]
    SchemaViolation {
        /// Description of the catalog rule that was broken.
        message: String,
    },

    /// A relationship's endpoint kinds fall outside the type's declared
    /// domain × range.
    #[error(
        "{relationship_type}: {end} kind '{kind}' not in allowed set [{allowed}]"
    )]
    DomainRangeViolation {
        /// The relationship type whose constraint was violated.
        relationship_type: String,
        /// `"source"` or `"target"`.
        end: &'static str,
        /// The offending entity kind.
        kind: String,
        /// Comma-separated list of allowed kinds.
        allowed: String,
    },

    /// A field value failed validation: bad format, out-of-range number,
    /// missing required field.
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Name of the offending field.
        field: String,
        /// Description of the failure.
        message: String,
    },

    /// `updated_at < created_at`, or a version went backwards.
    #[error("Temporal violation: {message}")]
    Temporal {
        /// Description of the ordering that was broken.
        message: String,
    },

    /// A tool was invoked before any graph was loaded.
    #[error("No graph loaded. Call load_graph first.")]
    NoGraphLoaded,

    /// A batch write was rejected; carries one entry per failing item.
    /// No mutation was applied.
    #[error("Batch rejected: {} item(s) failed validation", errors.len())]
    BatchRejected {
        /// Per-item failure reports, in batch order.
        errors: Vec<BatchItemError>,
    },

    /// A file write, rename, or parse failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The active backend cannot provide a requested analytic.
    #[error("Unsupported operation '{operation}': {hint}")]
    Unsupported {
        /// The operation that is unavailable.
        operation: String,
        /// Recommended alternative for the caller.
        hint: String,
    },

    /// Programmer error; caught at the dispatcher boundary and surfaced
    /// generically.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Closed wire-level error kinds, as serialised by the ATP and REST adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    SchemaViolation,
    Validation,
    Unsupported,
    NoGraphLoaded,
    BatchRejected,
    Persistence,
    Internal,
}

impl CoreError {
    /// Map this error onto its wire-level kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EntityNotFound { .. } | CoreError::RelationshipNotFound { .. } => {
                ErrorKind::NotFound
            }
            CoreError::SchemaViolation { .. } | CoreError::DomainRangeViolation { .. } => {
                ErrorKind::SchemaViolation
            }
            CoreError::IdCollision { .. }
            | CoreError::Validation { .. }
            | CoreError::Temporal { .. } => ErrorKind::Validation,
            CoreError::NoGraphLoaded => ErrorKind::NoGraphLoaded,
            CoreError::BatchRejected { .. } => ErrorKind::BatchRejected,
            CoreError::Persistence(_) => ErrorKind::Persistence,
            CoreError::Unsupported { .. } => ErrorKind::Unsupported,
            CoreError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Persistence(format!("JSON error: {e}"))
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Persistence(format!("I/O error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_onto_wire_taxonomy() {
        assert_eq!(
            CoreError::EntityNotFound { id: "x".into() }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CoreError::DomainRangeViolation {
                relationship_type: "governs".into(),
                end: "source",
                kind: "person".into(),
                allowed: "policy".into(),
            }
            .kind(),
            ErrorKind::SchemaViolation
        );
        assert_eq!(CoreError::NoGraphLoaded.kind(), ErrorKind::NoGraphLoaded);
        assert_eq!(
            CoreError::IdCollision { id: "dup".into() }.kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn batch_rejected_reports_item_count() {
        let err = CoreError::BatchRejected {
            errors: vec![
                BatchItemError { index: 1, error: "bad".into() },
                BatchItemError { index: 3, error: "worse".into() },
            ],
        };
        assert!(err.to_string().contains("2 item(s)"));
        assert_eq!(err.kind(), ErrorKind::BatchRejected);
    }

    #[test]
    fn error_kind_serialises_snake_case() {
        let json = serde_json::to_string(&ErrorKind::SchemaViolation).unwrap();
        assert_eq!(json, "\"schema_violation\"");
    }
}
