//! Error types for stratify.

use thiserror::Error;

/// Result type alias using stratify's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A single validation failure, categorized per the error taxonomy.
///
/// Validation errors are accumulated, never short-circuited: an operation
/// reports every violated rule so one round trip surfaces every problem.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ValidationError {
    /// Name rejected: empty, illegal characters, too long, or duplicate.
    #[error("Invalid name: {0}")]
    Name(String),

    /// Config field rejected: out-of-range numeric, missing required
    /// provider field, malformed custom identifier.
    #[error("Invalid config: {0}")]
    Config(String),

    /// Structural rule violated: hybrid with too few members, self-nesting,
    /// final_k exceeding initial_k.
    #[error("Invalid structure: {0}")]
    Structural(String),
}

impl ValidationError {
    /// Human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Name(m) | Self::Config(m) | Self::Structural(m) => m,
        }
    }
}

/// Core error type for stratify operations.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more validation rules failed. The operation was not applied.
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Operation referenced a strategy name not present in the collection.
    #[error("Strategy not found: {0}")]
    StrategyNotFound(String),

    /// Credential sealing failed in the external collaborator.
    #[error("Credential error: {0}")]
    Credential(String),

    /// Persistence collaborator failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Flatten into the message list handed back across the output boundary.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Validation(errors) => errors.iter().map(|e| e.to_string()).collect(),
            other => vec![other.to_string()],
        }
    }

    /// The accumulated validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_name() {
        let err = ValidationError::Name("name is empty".to_string());
        assert_eq!(err.to_string(), "Invalid name: name is empty");
    }

    #[test]
    fn test_validation_error_display_config() {
        let err = ValidationError::Config("top_k must be between 1 and 1000".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid config: top_k must be between 1 and 1000"
        );
    }

    #[test]
    fn test_validation_error_display_structural() {
        let err = ValidationError::Structural("hybrid requires at least 2 members".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid structure: hybrid requires at least 2 members"
        );
    }

    #[test]
    fn test_validation_error_message_strips_prefix() {
        let err = ValidationError::Config("dimension out of range".to_string());
        assert_eq!(err.message(), "dimension out of range");
    }

    #[test]
    fn test_error_display_validation_joins_all() {
        let err = Error::Validation(vec![
            ValidationError::Name("empty".to_string()),
            ValidationError::Config("bad top_k".to_string()),
        ]);
        let s = err.to_string();
        assert!(s.contains("Invalid name: empty"));
        assert!(s.contains("Invalid config: bad top_k"));
    }

    #[test]
    fn test_error_messages_expands_validation_list() {
        let err = Error::Validation(vec![
            ValidationError::Name("empty".to_string()),
            ValidationError::Structural("too few members".to_string()),
        ]);
        let messages = err.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Invalid name: empty");
    }

    #[test]
    fn test_error_messages_single_for_not_found() {
        let err = Error::StrategyNotFound("missing".to_string());
        assert_eq!(err.messages(), vec!["Strategy not found: missing"]);
    }

    #[test]
    fn test_validation_errors_accessor() {
        let err = Error::Validation(vec![ValidationError::Name("x".to_string())]);
        assert_eq!(err.validation_errors().unwrap().len(), 1);
        assert!(Error::Internal("y".to_string()).validation_errors().is_none());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_validation_error_serializes_tagged() {
        let err = ValidationError::Name("dup".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "name");
        assert_eq!(json["message"], "dup");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
