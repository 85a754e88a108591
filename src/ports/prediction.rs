//! Prediction service port: Trait for the remote classification service.
//!
//! The model itself lives behind an HTTP boundary; this trait keeps the
//! controller independent of the transport so it can be driven by a mock.

use async_trait::async_trait;

use crate::domain::{AssessmentError, HealthStatus, PredictionRequest, PredictionResponse};

/// Trait for talking to the prediction service.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Submit one coerced request and return the classification.
    ///
    /// # Errors
    /// Returns `AssessmentError::Service` when the service answers with a
    /// failure status, and `AssessmentError::Transport` when the request
    /// cannot be sent or the response body cannot be parsed.
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, AssessmentError>;

    /// Probe service liveness.
    ///
    /// # Errors
    /// Same taxonomy as [`PredictionService::predict`].
    async fn health(&self) -> Result<HealthStatus, AssessmentError>;
}
