//! Assessment lifecycle state.

use super::{AssessmentError, PredictionResponse};

/// Exactly one of these holds at any time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssessmentState {
    /// No prediction and no error
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The service returned a prediction
    Result(PredictionResponse),
    /// Validation, service or transport failure
    Failed(AssessmentError),
}

impl AssessmentState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn prediction(&self) -> Option<&PredictionResponse> {
        match self {
            Self::Result(response) => Some(response),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&AssessmentError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Result(_) => "result",
            Self::Failed(_) => "failed",
        }
    }
}
