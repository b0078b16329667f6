//! Project membership state mapping.
//!
//! Membership has no remote id; its state id is the composite
//! `project-id:user-id`, re-assembled on every read and parsed on import.

use crate::client::members::{MemberRequest, MemberResponse};
use crate::error::ProviderError;
use crate::values::Value;

use super::{opt_string_value, value_opt_string};

/// Assemble the composite state id.
pub fn composite_id(project_id: &str, user_id: &str) -> String {
    format!("{}:{}", project_id, user_id)
}

/// Parse a composite import id of the form `project-id:user-id`.
/// Whitespace around either half is trimmed; empty halves are invalid.
pub fn parse_import_id(raw: &str) -> Result<(String, String), ProviderError> {
    let trimmed = raw.trim();
    let Some((project, user)) = trimmed.split_once(':') else {
        return Err(ProviderError::InvalidImportId(format!(
            "expected project-id:user-id, got {:?}",
            raw
        )));
    };
    let project = project.trim();
    let user = user.trim();
    if project.is_empty() || user.is_empty() {
        return Err(ProviderError::InvalidImportId(format!(
            "expected project-id:user-id, got {:?}",
            raw
        )));
    }
    Ok((project.to_string(), user.to_string()))
}

/// Build the wire request from declared state.
pub fn encode(state: &Value) -> Result<MemberRequest, ProviderError> {
    let user_id = state
        .get("user_id")
        .as_str()
        .ok_or_else(|| ProviderError::Mapping("user_id is required".to_string()))?
        .to_string();
    Ok(MemberRequest {
        user_id,
        role: value_opt_string(state.get("role")),
    })
}

/// Build new state from the remote response.
pub fn decode(project_id: &str, response: &MemberResponse) -> Value {
    Value::object([
        ("id", Value::string(composite_id(project_id, &response.user_id))),
        ("project_id", Value::string(project_id)),
        ("user_id", Value::string(&response.user_id)),
        ("email", opt_string_value(response.email.as_deref())),
        ("role", opt_string_value(response.role.as_deref())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_composite_id() {
        let (project, user) = parse_import_id(" proj-1:user-42 ").unwrap();
        assert_eq!(project, "proj-1");
        assert_eq!(user, "user-42");
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert!(matches!(
            parse_import_id("proj-1"),
            Err(ProviderError::InvalidImportId(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_halves() {
        assert!(parse_import_id(":user-42").is_err());
        assert!(parse_import_id("proj-1: ").is_err());
        assert!(parse_import_id("  ").is_err());
    }

    #[test]
    fn test_decode_assembles_composite_id() {
        let response = MemberResponse {
            user_id: "user-42".to_string(),
            email: Some("dev@example.com".to_string()),
            role: Some("admin".to_string()),
        };
        let state = decode("proj-1", &response);
        assert_eq!(state.get("id").as_str(), Some("proj-1:user-42"));
        assert_eq!(state.get("email").as_str(), Some("dev@example.com"));
    }
}
