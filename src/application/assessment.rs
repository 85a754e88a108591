//! Assessment controller: owns the form and the submission lifecycle.
//!
//! Operations:
//! - `update_field`: set one raw value, no validation
//! - `submit`: validate, coerce, call the service, record the outcome
//! - `reset`: wipe the form and return to idle
//!
//! `submit` is also available in two halves (`begin_submission` /
//! `finish_submission`) so a UI can run the request on a background worker.
//! Every submission gets a ticket; `reset` or a newer submission invalidates
//! older tickets, and outcomes carrying a stale ticket are discarded.

use crate::domain::{
    AssessmentError, AssessmentState, FormField, FormInput, PredictionRequest, PredictionResponse,
};
use crate::ports::PredictionService;

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

/// A validated request ready to be sent.
#[derive(Debug, Clone)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub request: PredictionRequest,
}

/// Single owner of form input and assessment state.
#[derive(Debug, Default)]
pub struct AssessmentController {
    form: FormInput,
    state: AssessmentState,
    generation: u64,
}

impl AssessmentController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(&self) -> &FormInput {
        &self.form
    }

    #[must_use]
    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Set one field's raw value. Never fails.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Set a field addressed by its wire name (e.g. `"ST_Slope"`).
    ///
    /// # Errors
    /// Returns `AssessmentError::UnknownField` if `name` is not one of the eleven keys.
    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        let field: FormField = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Enter `Loading`, validate, and build the request.
    ///
    /// On missing fields the state becomes `Failed` and no request is built.
    ///
    /// # Errors
    /// Returns `AssessmentError::Validation` listing every empty field.
    pub fn begin_submission(&mut self) -> Result<Submission, AssessmentError> {
        self.generation += 1;
        self.state = AssessmentState::Loading;

        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            tracing::info!(count = missing.len(), "Submission blocked: required fields empty");
            let err = AssessmentError::Validation { missing };
            self.state = AssessmentState::Failed(err.clone());
            return Err(err);
        }

        let request = PredictionRequest::from_form(&self.form);

        let failed = request.coercion_failures();
        if !failed.is_empty() {
            tracing::warn!(
                count = failed.len(),
                "Numeric fields could not be parsed; sending null"
            );
        }
        let advisories = self.form.advisory_warnings();
        if !advisories.is_empty() {
            tracing::debug!(count = advisories.len(), "Values outside advisory ranges");
        }

        Ok(Submission {
            ticket: SubmissionTicket(self.generation),
            request,
        })
    }

    /// Record the outcome of a submission started by [`Self::begin_submission`].
    ///
    /// Returns `false` (and changes nothing) if the ticket is stale.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<PredictionResponse, AssessmentError>,
    ) -> bool {
        if ticket.0 != self.generation || !self.state.is_loading() {
            tracing::debug!(state = self.state.name(), "Discarding stale submission outcome");
            return false;
        }

        self.state = match outcome {
            Ok(response) => {
                tracing::info!(
                    classification = %response.classification(),
                    "Assessment complete"
                );
                AssessmentState::Result(response)
            }
            Err(err) => {
                tracing::warn!("Assessment failed: {err}");
                AssessmentState::Failed(err)
            }
        };
        true
    }

    /// Validate, send, and record the outcome in one step.
    ///
    /// Always leaves `Loading` before returning.
    pub async fn submit<P>(&mut self, service: &P) -> &AssessmentState
    where
        P: PredictionService + ?Sized,
    {
        let Ok(submission) = self.begin_submission() else {
            return &self.state;
        };
        let outcome = service.predict(&submission.request).await;
        self.finish_submission(submission.ticket, outcome);
        &self.state
    }

    /// Clear every field, drop any result or error, and return to `Idle`.
    ///
    /// Any submission still in flight becomes stale.
    pub fn reset(&mut self) {
        self.form.clear();
        self.state = AssessmentState::Idle;
        self.generation += 1;
        tracing::debug!("Assessment form reset");
    }

    /// Fill the form with a typical patient for demonstration.
    pub fn load_sample_data(&mut self) {
        let sample = [
            (FormField::Age, "54"),
            (FormField::Sex, "M"),
            (FormField::ChestPainType, "ASY"),
            (FormField::RestingBp, "140"),
            (FormField::Cholesterol, "239"),
            (FormField::FastingBs, "0"),
            (FormField::RestingEcg, "Normal"),
            (FormField::MaxHr, "160"),
            (FormField::ExerciseAngina, "N"),
            (FormField::Oldpeak, "1.2"),
            (FormField::StSlope, "Flat"),
        ];
        for (field, value) in sample {
            self.update_field(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, Probability, GENERIC_SERVICE_MESSAGE};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory service returning a fixed outcome and recording requests.
    struct MockService {
        outcome: Result<PredictionResponse, AssessmentError>,
        calls: Mutex<Vec<PredictionRequest>>,
    }

    impl MockService {
        fn returning(outcome: Result<PredictionResponse, AssessmentError>) -> Self {
            Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PredictionService for MockService {
        async fn predict(
            &self,
            request: &PredictionRequest,
        ) -> Result<PredictionResponse, AssessmentError> {
            self.calls.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }

        async fn health(&self) -> Result<HealthStatus, AssessmentError> {
            Ok(HealthStatus {
                status: "healthy".into(),
                message: String::new(),
            })
        }
    }

    fn response() -> PredictionResponse {
        PredictionResponse {
            prediction: 0,
            prediction_text: "No Heart Disease".to_string(),
            confidence: 0.9,
            probability: Probability {
                no_disease: 0.9,
                heart_disease: 0.1,
            },
        }
    }

    fn filled() -> AssessmentController {
        let mut controller = AssessmentController::new();
        for (name, value) in [
            ("Age", "45"),
            ("Sex", "M"),
            ("ChestPainType", "ATA"),
            ("RestingBP", "120"),
            ("Cholesterol", "200"),
            ("FastingBS", "0"),
            ("RestingECG", "Normal"),
            ("MaxHR", "150"),
            ("ExerciseAngina", "N"),
            ("Oldpeak", "1.5"),
            ("ST_Slope", "Up"),
        ] {
            controller.update_field_by_name(name, value).unwrap();
        }
        controller
    }

    #[tokio::test]
    async fn test_single_missing_field_is_named() {
        for field in FormField::ALL {
            let mut controller = filled();
            controller.update_field(field, "");
            let service = MockService::returning(Ok(response()));

            let state = controller.submit(&service).await.clone();

            assert_eq!(
                state,
                AssessmentState::Failed(AssessmentError::Validation {
                    missing: vec![field]
                })
            );
            assert_eq!(
                state.error().unwrap().to_string(),
                format!("Please fill in all required fields: {}", field.name())
            );
            assert_eq!(service.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_all_missing_fields_are_named() {
        let mut controller = AssessmentController::new();
        controller.update_field(FormField::Sex, "F");
        let service = MockService::returning(Ok(response()));

        controller.submit(&service).await;

        let err = controller.state().error().unwrap();
        assert_eq!(err.missing_fields().len(), 10);
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Age, ChestPainType, RestingBP, Cholesterol, \
             FastingBS, RestingECG, MaxHR, ExerciseAngina, Oldpeak, ST_Slope"
        );
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_success_transitions_to_result() {
        let mut controller = filled();
        let service = MockService::returning(Ok(response()));

        let state = controller.submit(&service).await;

        assert_eq!(state, &AssessmentState::Result(response()));
        assert_eq!(service.call_count(), 1);
        let sent = service.calls.lock().unwrap()[0].clone();
        assert_eq!(sent.age, Some(45));
        assert_eq!(sent.oldpeak, Some(1.5));
        assert_eq!(sent.st_slope, "Up");
    }

    #[tokio::test]
    async fn test_service_error_message() {
        let mut controller = filled();
        let service = MockService::returning(Err(AssessmentError::service(Some(
            "bad input".into(),
        ))));

        controller.submit(&service).await;

        assert_eq!(
            controller.state().error().map(ToString::to_string),
            Some("bad input".to_string())
        );
        assert!(controller.state().prediction().is_none());
    }

    #[tokio::test]
    async fn test_service_error_generic_message() {
        let mut controller = filled();
        let service = MockService::returning(Err(AssessmentError::service(None)));

        controller.submit(&service).await;

        assert_eq!(
            controller.state().error().unwrap().to_string(),
            GENERIC_SERVICE_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_resubmit_after_failure_clears_error() {
        let mut controller = filled();
        controller
            .submit(&MockService::returning(Err(AssessmentError::transport(
                "connection refused",
            ))))
            .await;
        assert!(controller.state().error().is_some());

        controller
            .submit(&MockService::returning(Ok(response())))
            .await;
        assert!(controller.state().error().is_none());
        assert_eq!(controller.state().prediction(), Some(&response()));
    }

    #[test]
    fn test_begin_submission_enters_loading() {
        let mut controller = filled();
        let submission = controller.begin_submission().unwrap();

        assert!(controller.is_loading());
        assert_eq!(submission.request.cholesterol, Some(200));
        assert!(controller.finish_submission(submission.ticket, Ok(response())));
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn test_reset_from_every_state() {
        let service = MockService::returning(Ok(response()));

        let mut idle = filled();
        idle.reset();

        let mut loading = filled();
        let _ = loading.begin_submission();
        loading.reset();

        let mut failed = AssessmentController::new();
        failed.update_field(FormField::Age, "60");
        failed.submit(&service).await;
        failed.reset();

        let mut result = filled();
        result.submit(&service).await;
        result.reset();

        for controller in [idle, loading, failed, result] {
            assert_eq!(controller.state(), &AssessmentState::Idle);
            assert_eq!(controller.form(), &FormInput::new());
            assert!(controller.state().error().is_none());
            assert!(controller.state().prediction().is_none());
        }
    }

    #[test]
    fn test_outcome_after_reset_is_discarded() {
        let mut controller = filled();
        let submission = controller.begin_submission().unwrap();
        controller.reset();

        assert!(!controller.finish_submission(submission.ticket, Ok(response())));
        assert_eq!(controller.state(), &AssessmentState::Idle);
    }

    #[test]
    fn test_newer_submission_wins() {
        let mut controller = filled();
        let first = controller.begin_submission().unwrap();
        let second = controller.begin_submission().unwrap();

        assert!(!controller.finish_submission(first.ticket, Ok(response())));
        assert!(controller.is_loading());
        assert!(controller.finish_submission(
            second.ticket,
            Err(AssessmentError::transport(""))
        ));
        assert_eq!(
            controller.state().error().unwrap().to_string(),
            crate::domain::GENERIC_TRANSPORT_MESSAGE
        );
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let mut once = AssessmentController::new();
        once.update_field(FormField::MaxHr, "172");

        let mut twice = AssessmentController::new();
        twice.update_field(FormField::MaxHr, "172");
        twice.update_field(FormField::MaxHr, "172");

        assert_eq!(once.form(), twice.form());
    }

    #[test]
    fn test_update_unknown_field() {
        let mut controller = AssessmentController::new();
        let err = controller
            .update_field_by_name("Smoking", "1")
            .unwrap_err();
        assert_eq!(err, AssessmentError::UnknownField("Smoking".into()));
        assert!(controller.form().is_blank());
    }

    #[test]
    fn test_sample_data_fills_every_field() {
        let mut controller = AssessmentController::new();
        controller.load_sample_data();
        assert!(controller.form().missing_fields().is_empty());
        assert!(controller.form().advisory_warnings().is_empty());
    }
}
