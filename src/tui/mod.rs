//! TUI module: Terminal User Interface using Ratatui.
//!
//! A single assessment screen:
//! - Eleven-field patient form
//! - Result panel with classification and probability bars
//! - Service status header

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::CardioTheme;
pub use worker::{AssessmentProgress, AssessmentWorker, AssessmentWorkerHandle};
