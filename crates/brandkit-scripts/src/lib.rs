//! Collaborator scripts for brandkit.
//!
//! This crate provides:
//! - `Script` / `ScriptCatalog`: the known scripts and where they live
//! - `ScriptInvocation`: a script path plus its argument list
//! - `ScriptRunner`: the seam the HTTP layer runs scripts through
//! - `ProcessRunner`: the tokio process implementation

mod catalog;
mod error;
mod invocation;
mod runner;

pub use catalog::{Script, ScriptCatalog};
pub use error::ScriptError;
pub use invocation::{ScriptInvocation, ScriptOutput};
pub use runner::{ProcessRunner, ScriptRunner};
