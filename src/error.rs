//! Error types for the Firefly provider.

use thiserror::Error;

use crate::schema::Diagnostic;

/// Errors that can occur while reconciling Firefly resources.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider configuration is incomplete or invalid.
    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    /// A backup schedule failed cross-attribute validation.
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// An import id could not be parsed.
    #[error("Invalid import id: {0}")]
    InvalidImportId(String),

    /// The remote entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote rejected the mutation because of a conflicting entity.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Authentication or authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A transient remote failure (timeout, rate limit, 5xx).
    #[error("Transient remote failure: {0}")]
    Transient(String),

    /// The remote returned a response the provider could not decode.
    #[error("Malformed remote response: {0}")]
    Malformed(String),

    /// Translation between declared state and the remote shape failed.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A validation error with an attribute path.
    #[error("Validation error at {path}: {message}")]
    Validation {
        /// Dotted path to the attribute at fault.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// The entity was created remotely but a follow-up step failed. The id
    /// must be persisted so the next refresh can reconcile instead of
    /// orphaning the entity.
    #[error("Created {id} but a follow-up step failed: {source}")]
    PartialCreate {
        /// The remote-assigned id of the half-configured entity.
        id: String,
        /// The follow-up failure.
        #[source]
        source: Box<ProviderError>,
    },

    /// The requested resource type is not registered.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other remote failure.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidConfig(msg)
            | Self::InvalidSchedule(msg)
            | Self::InvalidImportId(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Unauthorized(msg)
            | Self::Transient(msg)
            | Self::Malformed(msg)
            | Self::Mapping(msg)
            | Self::UnknownResource(msg)
            | Self::Upstream(msg) => msg.clone(),
            Self::Validation { message, .. } => message.clone(),
            Self::PartialCreate { .. } => self.to_string(),
            Self::Serialization(err) => err.to_string(),
        }
    }

    /// Whether a retry of the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    /// Whether the error means the remote entity is gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Convert this error into a host-facing diagnostic.
    ///
    /// `summary` names the failed operation ("Error creating firefly_project");
    /// the error itself becomes the detail. Validation errors carry their
    /// attribute path through.
    pub fn into_diagnostic(self, summary: impl Into<String>) -> Diagnostic {
        match self {
            Self::Validation { path, message } => Diagnostic::error(summary)
                .with_detail(message)
                .with_attribute(path),
            other => Diagnostic::error(summary).with_detail(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::Transient(err.to_string())
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::NotFound("project p-1".to_string());
        assert_eq!(format!("{}", err), "Not found: project p-1");

        let err = ProviderError::InvalidSchedule("days_of_week is required".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid schedule: days_of_week is required"
        );

        let err = ProviderError::UnknownResource("firefly_widget".to_string());
        assert_eq!(format!("{}", err), "Unknown resource type: firefly_widget");
    }

    #[test]
    fn test_classification_helpers() {
        assert!(ProviderError::Transient("503".to_string()).is_transient());
        assert!(!ProviderError::Conflict("409".to_string()).is_transient());
        assert!(ProviderError::NotFound("gone".to_string()).is_not_found());
    }

    #[test]
    fn test_validation_into_diagnostic_carries_path() {
        let err = ProviderError::Validation {
            path: "schedule.days_of_week".to_string(),
            message: "must be non-empty for weekly schedules".to_string(),
        };
        let diag = err.into_diagnostic("Error validating firefly_backup_policy");
        assert_eq!(diag.summary, "Error validating firefly_backup_policy");
        assert_eq!(diag.attribute, Some("schedule.days_of_week".to_string()));
    }

    #[test]
    fn test_message_method() {
        let err = ProviderError::Conflict("name already taken".to_string());
        assert_eq!(err.message(), "name already taken");

        let err = ProviderError::Validation {
            path: "name".to_string(),
            message: "too short".to_string(),
        };
        assert_eq!(err.message(), "too short");
    }
}
