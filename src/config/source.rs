use std::collections::BTreeMap;
use std::fmt;

use super::store::MaskedValues;

/// A read-only key/value provider consulted ahead of the settings store.
///
/// Providers are never mutated by [`Settings`](super::Settings); a host shares
/// one instance across every context it creates.
pub trait OverrideSource: Send + Sync + std::fmt::Debug {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Overrides supplied explicitly by the host program.
#[derive(Clone, Default)]
pub struct MapOverrides {
    values: BTreeMap<String, String>,
}

impl fmt::Debug for MapOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOverrides")
            .field("values", &MaskedValues(&self.values))
            .finish()
    }
}

impl MapOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapOverrides
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl OverrideSource for MapOverrides {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
