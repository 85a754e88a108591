//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the assessment logic and the remote prediction service.

mod prediction;

pub use prediction::PredictionService;
