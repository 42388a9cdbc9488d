//! # Brandkit Config
//!
//! Configuration management for the brandkit service: server binding, upload
//! limits, collaborator script locations and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
