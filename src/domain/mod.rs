//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs`: signing descriptors, release documents, report structs.
//! - `constants.rs`: fixed descriptor values, file names, env var names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! The descriptor structs define the exact JSON handed to the signing client.
//! Keep field renames synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
