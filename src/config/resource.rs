//! Loading of the named base resource a [`Settings`](super::Settings) starts from.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Name of the base resource used when none is given.
pub const DEFAULT_RESOURCE: &str = "dependencycheck.toml";

const DEFAULT_RESOURCE_CONTENTS: &str = include_str!("../../resources/dependencycheck.toml");

/// Maps a logical resource name to its TOML text.
///
/// Any `Fn(&str) -> Result<String, ConfigError>` closure is a loader, which
/// keeps tests and embedding hosts free of filesystem fixtures.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, name: &str) -> Result<String, ConfigError>;
}

impl<F> ResourceLoader for F
where
    F: Fn(&str) -> Result<String, ConfigError> + Send + Sync,
{
    fn load(&self, name: &str) -> Result<String, ConfigError> {
        self(name)
    }
}

/// Resources compiled into the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedResources {
    resources: BTreeMap<String, Cow<'static, str>>,
}

impl EmbeddedResources {
    /// A loader with no resources at all.
    pub fn empty() -> Self {
        Self {
            resources: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, contents: impl Into<Cow<'static, str>>) -> Self {
        self.resources.insert(name.into(), contents.into());
        self
    }
}

impl Default for EmbeddedResources {
    /// Holds the bundled `dependencycheck.toml`.
    fn default() -> Self {
        Self::empty().with(DEFAULT_RESOURCE, DEFAULT_RESOURCE_CONTENTS)
    }
}

impl ResourceLoader for EmbeddedResources {
    fn load(&self, name: &str) -> Result<String, ConfigError> {
        self.resources
            .get(name)
            .map(|contents| contents.to_string())
            .ok_or_else(|| ConfigError::ResourceNotFound(name.to_string()))
    }
}

/// Resources looked up as files beneath a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ResourceLoader for DirectoryResources {
    fn load(&self, name: &str) -> Result<String, ConfigError> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::ResourceNotFound(name.to_string()))
            }
            Err(e) => Err(ConfigError::ReadError { path, source: e }),
        }
    }
}
