//! Service layer containing pipeline logic and side-effect helpers.
//!
//! ## Service map
//! - `settings.rs`: environment-backed settings for each pipeline step.
//! - `esrp.rs`: signing descriptors, input scan, signing-client invocation.
//! - `redact.rs`: scrubbing of upload URLs from signing-client logs.
//! - `release_assets.rs`: release lookup/download with a single retry.
//! - `repo_config.rs`: package-repository client configuration.
//! - `keyring.rs`: GPG secret key listing and fingerprint checks.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod esrp;
pub mod keyring;
pub mod output;
pub mod redact;
pub mod release_assets;
pub mod repo_config;
pub mod settings;
