//! Background worker for non-blocking prediction requests.
//!
//! Requests run as tasks on a tokio runtime and report back over a channel,
//! so the TUI main loop keeps drawing and accepting input while a request is
//! in flight.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use tokio::runtime::Handle;

use crate::application::{Submission, SubmissionTicket};
use crate::domain::{AssessmentError, HealthStatus, PredictionResponse};
use crate::ports::PredictionService;

/// Progress updates from the assessment worker.
#[derive(Debug, Clone)]
pub enum AssessmentProgress {
    /// Request handed to the HTTP client
    Sending,
    /// Request finished, successfully or not
    Complete(Result<PredictionResponse, AssessmentError>),
}

/// Handle to a running assessment request.
pub struct AssessmentWorkerHandle {
    /// Ticket to hand back to the controller with the outcome
    pub ticket: SubmissionTicket,
    progress_rx: Receiver<AssessmentProgress>,
}

impl AssessmentWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    ///
    /// A task that ended without reporting (a panic inside the service)
    /// surfaces as a failed `Complete` with the generic transport message.
    #[must_use]
    pub fn try_recv(&self) -> Option<AssessmentProgress> {
        match self.progress_rx.try_recv() {
            Ok(progress) => Some(progress),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                tracing::warn!("Assessment worker ended without reporting an outcome");
                Some(AssessmentProgress::Complete(Err(AssessmentError::transport(
                    "",
                ))))
            }
        }
    }
}

/// Spawns prediction and health requests on the runtime.
pub struct AssessmentWorker;

impl AssessmentWorker {
    /// Spawn a background prediction request.
    ///
    /// Dropping the returned handle discards the outcome.
    pub fn spawn(
        runtime: &Handle,
        service: Arc<dyn PredictionService>,
        submission: Submission,
    ) -> AssessmentWorkerHandle {
        let (tx, rx) = mpsc::channel();
        let Submission { ticket, request } = submission;

        runtime.spawn(async move {
            Self::report(&tx, AssessmentProgress::Sending);
            let outcome = service.predict(&request).await;
            Self::report(&tx, AssessmentProgress::Complete(outcome));
        });

        AssessmentWorkerHandle {
            ticket,
            progress_rx: rx,
        }
    }

    /// Probe service health once in the background.
    pub fn probe_health(
        runtime: &Handle,
        service: Arc<dyn PredictionService>,
    ) -> Receiver<Result<HealthStatus, AssessmentError>> {
        let (tx, rx) = mpsc::channel();
        runtime.spawn(async move {
            let status = service.health().await;
            if let Err(e) = &status {
                tracing::warn!("Health probe failed: {e}");
            }
            let _ = tx.send(status);
        });
        rx
    }

    fn report(tx: &Sender<AssessmentProgress>, progress: AssessmentProgress) {
        // The receiver is gone once the UI has reset or quit.
        if tx.send(progress).is_err() {
            tracing::debug!("Assessment outcome dropped: no receiver");
        }
    }
}
