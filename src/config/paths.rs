//! Filesystem path resolution for settings values.
//!
//! Values starting with [`ARTIFACT_MARKER`] are resolved against the directory
//! holding the running executable, so a bundled distribution can ship its data
//! next to the binary regardless of the working directory it is launched from.

use std::path::{Path, PathBuf};

use super::keys;
use super::settings::Settings;
use super::store::masked;
use super::ConfigError;

/// Prefix marking a path as relative to the running artifact's directory.
pub const ARTIFACT_MARKER: &str = "[APP]";

impl Settings {
    /// Returns the value of `key` as a path, without checking that it exists.
    pub fn get_file(&self, key: &str) -> Option<PathBuf> {
        self.get_string(key).map(PathBuf::from)
    }

    /// Like [`get_file`](Self::get_file) but honours [`ARTIFACT_MARKER`].
    pub(crate) fn get_data_file(&self, key: &str) -> Option<PathBuf> {
        let file = self.get_string(key)?;
        tracing::debug!(key, file = %masked(key, &file), "resolving data file");

        let Some(rest) = file.strip_prefix(ARTIFACT_MARKER) else {
            return Some(PathBuf::from(file));
        };
        let rest = rest.trim_start_matches(['/', '\\']);
        let container = self.artifact_container();
        let resolved = container.join(rest);
        tracing::debug!(container = %container.display(), resolved = %resolved.display(), "transformed artifact-relative path");
        Some(resolved)
    }

    /// Returns the data directory, creating it (and any parents) if needed.
    pub fn data_directory(&self) -> Result<PathBuf, ConfigError> {
        let path = self
            .get_data_file(keys::DATA_DIRECTORY)
            .ok_or_else(|| ConfigError::invalid(keys::DATA_DIRECTORY, "data directory is not configured"))?;
        ensure_directory(&path)?;
        Ok(path)
    }

    fn artifact_container(&self) -> PathBuf {
        match self.artifact_location() {
            Some(location) => container_of_location(location),
            None => match std::env::current_exe() {
                Ok(exe) => container_of(&exe),
                Err(e) => {
                    tracing::trace!(error = %e, "unable to locate the running executable");
                    PathBuf::from(".")
                }
            },
        }
    }
}

/// Creates `path` as a directory unless it already is one.
pub(crate) fn ensure_directory(path: &Path) -> Result<(), ConfigError> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(ConfigError::NotADirectory(path.to_path_buf()));
    }
    std::fs::create_dir_all(path).map_err(|source| ConfigError::CreateDirectory {
        path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
        source,
    })
}

/// Decodes a percent-encoded artifact location and returns its container.
fn container_of_location(location: &str) -> PathBuf {
    match urlencoding::decode(location) {
        Ok(decoded) => container_of(Path::new(decoded.as_ref())),
        Err(e) => {
            tracing::trace!(location, error = %e, "artifact location is not valid UTF-8 once decoded");
            PathBuf::from(".")
        }
    }
}

/// A file's parent directory; the working directory for anything else.
fn container_of(path: &Path) -> PathBuf {
    if path.is_dir() {
        return PathBuf::from(".");
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
