//! Flat key/value storage behind a [`Settings`](super::Settings) instance.
//!
//! TOML documents are flattened into dotted keys on the way in, so a nested
//! `[data]` table with `directory = "x"` and a top-level quoted key
//! `"data.directory" = "x"` land in the same slot.

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use toml::{Table, Value};
use tracing::Level;

use super::ConfigError;

const MASK: &str = "*****";

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConfigurationStore {
    values: BTreeMap<String, String>,
}

impl fmt::Debug for ConfigurationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationStore")
            .field("values", &MaskedValues(&self.values))
            .finish()
    }
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: Table) -> Result<Self, ConfigError> {
        let mut store = Self::new();
        store.merge_table(table)?;
        Ok(store)
    }

    /// Overlays every flattened entry of `table`, overwriting existing keys.
    ///
    /// The table is flattened before anything is written, so an unsupported
    /// value leaves the store untouched. Returns the number of entries applied.
    pub fn merge_table(&mut self, table: Table) -> Result<usize, ConfigError> {
        let entries = flatten(table)?;
        let count = entries.len();
        self.values.extend(entries);
        Ok(count)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Dumps every entry at debug level, masking credentials.
    pub(crate) fn log_properties(&self, header: &str) {
        if !tracing::enabled!(Level::DEBUG) {
            return;
        }
        let mut dump = format!("{header}:\n");
        for (key, value) in self.iter() {
            let _ = writeln!(dump, "{key}='{}'", masked(key, value));
        }
        tracing::debug!("{dump}");
    }
}

/// Returns `value`, or a fixed mask when `key` names a password.
pub(crate) fn masked<'a>(key: &str, value: &'a str) -> &'a str {
    if key.contains("password") {
        MASK
    } else {
        value
    }
}

/// Debug view of a key/value map with password values masked.
pub(crate) struct MaskedValues<'a>(pub(crate) &'a BTreeMap<String, String>);

impl fmt::Debug for MaskedValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, masked(k, v))))
            .finish()
    }
}

/// Flattens a TOML table into `(dotted.key, string)` pairs.
pub fn flatten(table: Table) -> Result<Vec<(String, String)>, ConfigError> {
    let mut entries = Vec::new();
    flatten_into(&mut entries, "", table)?;
    Ok(entries)
}

fn flatten_into(
    entries: &mut Vec<(String, String)>,
    prefix: &str,
    table: Table,
) -> Result<(), ConfigError> {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            Value::Table(nested) => flatten_into(entries, &path, nested)?,
            Value::Array(items) => {
                let rendered = items
                    .iter()
                    .map(|item| scalar_to_string(item, &path))
                    .collect::<Result<Vec<_>, _>>()?;
                entries.push((path, rendered.join(",")));
            }
            scalar => {
                let rendered = scalar_to_string(&scalar, &path)?;
                entries.push((path, rendered));
            }
        }
    }
    Ok(())
}

fn scalar_to_string(value: &Value, path: &str) -> Result<String, ConfigError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Datetime(dt) => Ok(dt.to_string()),
        Value::Array(_) | Value::Table(_) => Err(ConfigError::UnsupportedValue(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(toml_str: &str) -> Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn test_nested_tables_flatten_to_dotted_keys() {
        let store = ConfigurationStore::from_table(make_table(
            r#"
            [data]
            directory = "[APP]/data"
            file_name = "dc.h2.db"

            [cve.url]
            meta = "https://example.org/meta"
            "#,
        ))
        .unwrap();

        assert_eq!(store.get("data.directory"), Some("[APP]/data"));
        assert_eq!(store.get("data.file_name"), Some("dc.h2.db"));
        assert_eq!(store.get("cve.url.meta"), Some("https://example.org/meta"));
    }

    #[test]
    fn test_quoted_and_nested_keys_share_a_slot() {
        let mut store = ConfigurationStore::from_table(make_table(
            r#"
            [data]
            directory = "nested"
            "#,
        ))
        .unwrap();
        store
            .merge_table(make_table(r#""data.directory" = "quoted""#))
            .unwrap();

        assert_eq!(store.get("data.directory"), Some("quoted"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_scalars_render_as_strings() {
        let store = ConfigurationStore::from_table(make_table(
            r#"
            timeout = 10000
            ratio = 0.5
            enabled = true
            zips = ["ear", "war"]
            "#,
        ))
        .unwrap();

        assert_eq!(store.get("timeout"), Some("10000"));
        assert_eq!(store.get("ratio"), Some("0.5"));
        assert_eq!(store.get("enabled"), Some("true"));
        assert_eq!(store.get("zips"), Some("ear,war"));
    }

    #[test]
    fn test_nested_array_rejected_without_partial_merge() {
        let mut store = ConfigurationStore::new();
        store.set("keep", "me");

        let result = store.merge_table(make_table(
            r#"
            a = "1"
            bad = [["x"]]
            "#,
        ));

        assert!(matches!(result, Err(ConfigError::UnsupportedValue(ref k)) if k == "bad"));
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("keep"), Some("me"));
    }

    #[test]
    fn test_merge_is_last_write_wins() {
        let mut store = ConfigurationStore::from_table(make_table(
            r#"
            k = "v1"
            other = "stays"
            "#,
        ))
        .unwrap();
        let applied = store.merge_table(make_table(r#"k = "v2""#)).unwrap();

        assert_eq!(applied, 1);
        assert_eq!(store.get("k"), Some("v2"));
        assert_eq!(store.get("other"), Some("stays"));
    }

    #[test]
    fn test_remove_and_set() {
        let mut store = ConfigurationStore::new();
        store.set("a", "1");
        assert!(store.contains_key("a"));
        assert_eq!(store.remove("a"), Some("1".to_string()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_password_values_are_masked() {
        assert_eq!(masked("proxy.password", "hunter2"), MASK);
        assert_eq!(masked("data.password", "secret"), MASK);
        assert_eq!(masked("proxy.username", "bob"), "bob");
    }

    #[test]
    fn test_debug_output_masks_passwords() {
        let mut store = ConfigurationStore::new();
        store.set("data.password", "DC-Pass1337!");
        store.set("data.user", "dcuser");

        let rendered = format!("{store:?}");

        assert!(!rendered.contains("DC-Pass1337!"), "{rendered}");
        assert!(rendered.contains("\"data.password\": \"*****\""), "{rendered}");
        assert!(rendered.contains("dcuser"), "{rendered}");
    }
}
