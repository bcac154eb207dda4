//! Per-context settings for the dependency-check engine.
//!
//! Settings are merged from a base resource and any number of TOML overlays,
//! read through a chain of override sources, and resolved into typed values,
//! artifact-relative paths and storage connection strings. A
//! [`SettingsContext`] owns the binding and the temporary directory handed out
//! to the analyzers running under it.

pub mod analyzer;
pub mod config;
pub mod context;
pub mod evidence;
mod error;

pub use config::{keys, ConfigError, EnvOverrides, MapOverrides, Settings, SettingsBuilder};
pub use context::{SettingsContext, SettingsContextBuilder};
pub use error::Error;
