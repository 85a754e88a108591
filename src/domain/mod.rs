//! Domain layer: Core types for the assessment form and prediction contract.
//!
//! Pure data and conversions; no I/O happens here.

mod error;
mod form;
mod prediction;
mod state;

pub use error::{AssessmentError, GENERIC_SERVICE_MESSAGE, GENERIC_TRANSPORT_MESSAGE};
pub use form::{AdvisoryWarning, FieldKind, FieldOption, FormField, FormInput};
pub use prediction::{
    format_percent, Classification, HealthStatus, PredictionRequest, PredictionResponse,
    Probability,
};
pub use state::AssessmentState;
