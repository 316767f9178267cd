//! CLI command implementations.
//!
//! Each command owns its full lifecycle: load environment, build config,
//! acquire a scoped store handle, run, and release the handle on every exit
//! path.

pub mod admin;
pub mod migrate;
pub mod settings;
