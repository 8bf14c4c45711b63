//! Configuration module
//!
//! File-backed defaults (`config`) and the per-update visual settings
//! derived from them (`settings`).

#[allow(clippy::module_inception)]
pub mod config;
pub mod settings;
