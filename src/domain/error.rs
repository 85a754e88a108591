//! Assessment error taxonomy.
//!
//! Every variant's `Display` output is the exact message shown to the user.

use super::FormField;

/// Shown when the service rejects a request without an `error` message.
pub const GENERIC_SERVICE_MESSAGE: &str = "Network response was not ok";

/// Shown when a transport failure carries no message of its own.
pub const GENERIC_TRANSPORT_MESSAGE: &str = "An error occurred while making the prediction";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    /// Required fields were empty; no request was sent.
    #[error("Please fill in all required fields: {}", field_list(.missing))]
    Validation { missing: Vec<FormField> },

    /// The service answered with a non-success status.
    #[error("{0}")]
    Service(String),

    /// The request could not be completed or the body could not be read.
    #[error("{0}")]
    Transport(String),

    #[error("Unknown form field: {0}")]
    UnknownField(String),
}

impl AssessmentError {
    /// Service error carrying the body's `error` message, or the generic one.
    #[must_use]
    pub fn service(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self::Service(m),
            _ => Self::Service(GENERIC_SERVICE_MESSAGE.to_string()),
        }
    }

    /// Transport error from an underlying failure message.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Transport(GENERIC_TRANSPORT_MESSAGE.to_string())
        } else {
            Self::Transport(message)
        }
    }

    /// Missing fields for a validation failure, empty otherwise.
    #[must_use]
    pub fn missing_fields(&self) -> &[FormField] {
        match self {
            Self::Validation { missing } => missing,
            _ => &[],
        }
    }
}

fn field_list(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = AssessmentError::Validation {
            missing: vec![FormField::RestingBp, FormField::StSlope],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: RestingBP, ST_Slope"
        );
        assert_eq!(err.missing_fields().len(), 2);
    }

    #[test]
    fn test_service_message_fallback() {
        assert_eq!(
            AssessmentError::service(Some("bad input".into())).to_string(),
            "bad input"
        );
        assert_eq!(
            AssessmentError::service(Some(String::new())).to_string(),
            GENERIC_SERVICE_MESSAGE
        );
        assert_eq!(
            AssessmentError::service(None).to_string(),
            GENERIC_SERVICE_MESSAGE
        );
    }

    #[test]
    fn test_transport_message_fallback() {
        assert_eq!(
            AssessmentError::transport("connection refused").to_string(),
            "connection refused"
        );
        assert_eq!(
            AssessmentError::transport("  ").to_string(),
            GENERIC_TRANSPORT_MESSAGE
        );
        assert!(AssessmentError::transport("x").missing_fields().is_empty());
    }
}
