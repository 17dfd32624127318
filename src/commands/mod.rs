//! Command handler layer.
//!
//! ## Files
//! - `signing.rs`: `sign`: descriptors, signing client run, result report.
//! - `pipeline.rs`: `fetch-asset`, `repo-config`, `verify-key`.
//!
//! ## Principles
//! - Read settings before any filesystem or network access.
//! - Delegate work to `services/*`.
//! - Keep behavior and output schema stable.

pub mod pipeline;
pub mod signing;

pub use pipeline::handle_pipeline_commands;
pub use signing::handle_signing_commands;
