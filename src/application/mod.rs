//! Application layer: Use cases and services.
//!
//! This module orchestrates the domain types with the prediction port to
//! implement the assessment workflow.

mod assessment;

pub use assessment::{AssessmentController, Submission, SubmissionTicket};
