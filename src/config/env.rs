use std::collections::BTreeMap;
use std::fmt;

use super::source::OverrideSource;
use super::store::MaskedValues;

/// Overrides read from prefixed environment variables.
///
/// Variables are mapped to setting keys by:
/// 1. Removing the prefix and separator
/// 2. Splitting remaining segments on the separator
/// 3. Lowercasing each segment and joining with `.`
///
/// With prefix `DC` and separator `__`, `DC__DATA__FILE_NAME` overrides
/// `data.file_name`. The environment is captured once at construction.
#[derive(Clone)]
pub struct EnvOverrides {
    values: BTreeMap<String, String>,
}

impl fmt::Debug for EnvOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOverrides")
            .field("values", &MaskedValues(&self.values))
            .finish()
    }
}

impl EnvOverrides {
    /// Captures the current process environment.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self::from_vars(prefix, separator, std::env::vars())
    }

    /// Builds the overrides from an explicit variable list.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, separator: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let prefix = prefix.into();
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");

        let prefix_with_sep = format!("{prefix}{separator}");
        let mut values = BTreeMap::new();

        for (name, value) in vars {
            let Some(path_str) = name.as_ref().strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }

            let key = path_str
                .split(separator.as_str())
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            values.insert(key, value.into());
        }

        tracing::trace!(count = values.len(), prefix = %prefix, "captured environment overrides");
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl OverrideSource for EnvOverrides {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
