//! Settings loading, resolution and path handling.

mod builder;
mod connection;
mod env;
mod error;
mod file;
pub mod keys;
mod paths;
mod resource;
mod settings;
mod source;
mod store;

pub use builder::SettingsBuilder;
pub use connection::{H2_FILE_PREFIX, H2_FILE_SUFFIX};
pub use env::EnvOverrides;
pub use error::ConfigError;
pub use file::{read_stream, FileSource};
pub use paths::ARTIFACT_MARKER;
pub use resource::{DirectoryResources, EmbeddedResources, ResourceLoader, DEFAULT_RESOURCE};
pub use settings::Settings;
pub use source::{MapOverrides, OverrideSource};
pub use store::{flatten, ConfigurationStore};
