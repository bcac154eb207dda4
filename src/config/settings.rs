use std::fmt::Display;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use toml::Table;

use super::file::{read_stream, FileSource};
use super::resource::ResourceLoader;
use super::source::OverrideSource;
use super::store::{masked, ConfigurationStore};
use super::ConfigError;

/// Resolved settings for one execution context.
///
/// Every read consults the override providers in registration order, then the
/// store, then the caller's default. Writes only ever touch the store, so an
/// override keeps winning after [`set_string`](Self::set_string) on the same key.
///
/// A `Settings` is owned by whoever built it and is never shared between
/// contexts; build one per context through [`Settings::builder`] or
/// [`SettingsContext`](crate::SettingsContext).
#[derive(Debug)]
pub struct Settings {
    store: ConfigurationStore,
    overrides: Vec<Arc<dyn OverrideSource>>,
    artifact_location: Option<String>,
}

impl Settings {
    /// Loads the base resource, logging (not returning) any failure.
    pub(crate) fn load(
        loader: &dyn ResourceLoader,
        resource: &str,
        overrides: Vec<Arc<dyn OverrideSource>>,
        artifact_location: Option<String>,
    ) -> Self {
        let store = match load_base(loader, resource) {
            Ok(store) => store,
            Err(e) => {
                tracing::error!(resource, "unable to load default settings");
                tracing::debug!(resource, error = %e, "base settings load failed");
                ConfigurationStore::new()
            }
        };
        store.log_properties("Properties loaded");

        Self {
            store,
            overrides,
            artifact_location,
        }
    }

    /// Wraps an already populated store with no overrides.
    pub fn from_store(store: ConfigurationStore) -> Self {
        Self {
            store,
            overrides: Vec::new(),
            artifact_location: None,
        }
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    pub(crate) fn artifact_location(&self) -> Option<&str> {
        self.artifact_location.as_deref()
    }

    pub(crate) fn set_artifact_location(&mut self, location: impl Into<String>) {
        self.artifact_location = Some(location.into());
    }

    /// Returns the effective value of `key`, or `None` if nothing defines it.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.overrides
            .iter()
            .find_map(|source| source.lookup(key))
            .or_else(|| self.store.get(key).map(str::to_string))
    }

    /// Returns the effective value of `key`, falling back to `default`.
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|| default.to_string())
    }

    pub fn get_int(&self, key: &str) -> Result<i32, ConfigError> {
        self.parse_required(key, "an int")
    }

    /// Like [`get_int`](Self::get_int) but yields `default` on any failure.
    pub fn get_int_or(&self, key: &str, default: i32) -> i32 {
        self.get_int(key).unwrap_or_else(|e| {
            tracing::trace!(key, error = %e, "using default int");
            default
        })
    }

    pub fn get_long(&self, key: &str) -> Result<i64, ConfigError> {
        self.parse_required(key, "a long")
    }

    /// Accepts `true` or `false` in any ASCII case.
    pub fn get_boolean(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self
            .get_string(key)
            .ok_or_else(|| ConfigError::invalid(key, "could not convert a missing value to a boolean"))?;
        parse_bool(&value).ok_or_else(|| {
            ConfigError::invalid(
                key,
                format!("could not convert '{}' to a boolean", masked(key, &value)),
            )
        })
    }

    /// Like [`get_boolean`](Self::get_boolean) but yields `default` on any failure.
    pub fn get_boolean_or(&self, key: &str, default: bool) -> bool {
        self.get_boolean(key).unwrap_or_else(|e| {
            tracing::trace!(key, error = %e, "using default boolean");
            default
        })
    }

    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        tracing::debug!("Setting: {key}='{}'", masked(&key, &value));
        self.store.set(key, value);
    }

    pub fn set_boolean(&mut self, key: impl Into<String>, value: bool) {
        self.set_string(key, value.to_string());
    }

    /// Removes `key` from the store. Overrides are unaffected.
    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.store.remove(key)
    }

    /// Merges a TOML file over the current values.
    ///
    /// Unlike the base resource, an unreadable file is an error.
    pub fn merge_file(&mut self, path: impl AsRef<Path>) -> Result<usize, ConfigError> {
        let source = FileSource::new(path, true);
        match source.load()? {
            Some(table) => self.merge_table(table),
            None => Ok(0),
        }
    }

    /// Merges a TOML document read from `reader` over the current values.
    pub fn merge_reader(&mut self, reader: impl Read) -> Result<usize, ConfigError> {
        let table = read_stream(reader)?;
        self.merge_table(table)
    }

    pub fn merge_table(&mut self, table: Table) -> Result<usize, ConfigError> {
        let count = self.store.merge_table(table)?;
        self.store.log_properties("Properties updated via merge");
        Ok(count)
    }

    fn parse_required<T>(&self, key: &str, target: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let value = self.get_string(key).ok_or_else(|| {
            ConfigError::invalid(key, format!("could not convert a missing value to {target}"))
        })?;
        value.parse::<T>().map_err(|e| {
            ConfigError::invalid(
                key,
                format!("could not convert '{}' to {target}: {e}", masked(key, &value)),
            )
        })
    }
}

fn load_base(loader: &dyn ResourceLoader, resource: &str) -> Result<ConfigurationStore, ConfigError> {
    let text = loader.load(resource)?;
    let table = read_stream(text.as_bytes())?;
    ConfigurationStore::from_table(table)
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
