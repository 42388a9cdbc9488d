//! White-label client setup.
//!
//! Runs admin Firebase setup, client Firebase setup and asset generation
//! strictly in that order. The first failing step ends the run; steps that
//! already completed are not rolled back.

mod pipeline;
mod step;

pub use pipeline::WhitelabelPipeline;
pub use step::{StepFailure, StepResult, WhitelabelStep, WHITELABEL_STEPS};
