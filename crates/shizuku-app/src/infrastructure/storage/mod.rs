//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module owns the single on-disk settings document:
//!
//! - Resolving the per-user config directory and creating it on first run.
//! - Writing the default settings when no file exists yet.
//! - Reading the file back with overlay-on-defaults semantics.
//! - Writing changes back to disk when the frontend modifies settings.

pub mod config;
