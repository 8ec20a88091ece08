//! Field-level validation shared by the write tools and the importer.

use crate::error::{CoreError, CoreResult};

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;
/// Transport-level id limit: path parameters longer than this are rejected
/// before they reach the graph.
pub const MAX_ID_LENGTH: usize = 128;

/// Check that an id contains only URL-safe characters.
///
/// Allowed: alphanumeric plus `-`, `_`, `:`, `.` (UUIDs, shard-style ids
/// like `REG-00001`, and namespaced ids like `acme:crm` all pass).
pub fn validate_id_format(id: &str) -> CoreResult<()> {
    if id.is_empty() {
        return Err(CoreError::Validation {
            field: "id".into(),
            message: "ID must not be empty.".into(),
        });
    }
    if id.len() > MAX_ID_LENGTH {
        return Err(CoreError::Validation {
            field: "id".into(),
            message: format!("ID exceeds {MAX_ID_LENGTH} characters."),
        });
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
    {
        return Err(CoreError::Validation {
            field: "id".into(),
            message: format!(
                "ID contains invalid character '{bad}'. Only alphanumeric, \
                 underscore, colon, dot, and hyphen are allowed."
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_and_shard_ids_pass() {
        assert!(validate_id_format("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_id_format("REG-00001").is_ok());
        assert!(validate_id_format("acme:crm.prod").is_ok());
    }

    #[test]
    fn empty_overlong_and_unsafe_ids_fail() {
        assert!(validate_id_format("").is_err());
        assert!(validate_id_format(&"x".repeat(129)).is_err());
        assert!(validate_id_format("id with spaces").is_err());
        assert!(validate_id_format("../etc/passwd").is_err());
        assert!(validate_id_format("a/b").is_err());
    }
}
