//! # CardioPredict
//!
//! Terminal client for a remote heart-disease risk prediction service.
//!
//! This crate provides:
//! - An eleven-field clinical assessment form with submit-time validation
//! - Numeric coercion into the service's JSON request contract
//! - An HTTP client for `POST /predict` and `GET /health`
//! - A terminal UI showing the binary classification and class probabilities
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Form fields, request/response types, assessment state
//! - `ports`: Trait for the remote prediction service
//! - `adapters`: reqwest client and log sanitization
//! - `application`: The assessment controller
//! - `config`: Environment-driven client configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::AssessmentController;
pub use domain::{AssessmentError, AssessmentState, FormField, PredictionResponse};

/// Result type for CardioPredict operations
pub type Result<T> = std::result::Result<T, CardioPredictError>;

/// Main error type for CardioPredict
#[derive(Debug, thiserror::Error)]
pub enum CardioPredictError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
