use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use toml::Table;

use super::file::{read_stream, FileSource};
use super::resource::{EmbeddedResources, ResourceLoader, DEFAULT_RESOURCE};
use super::settings::Settings;
use super::source::OverrideSource;
use super::ConfigError;

/// An overlay merged on top of the base resource.
enum Overlay {
    File(FileSource),
    Table(Table),
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(source) => f.debug_tuple("File").field(source).finish(),
            // Keys only; values may hold credentials.
            Self::Table(table) => f
                .debug_tuple("Table")
                .field(&table.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// Builder for a [`Settings`] instance.
///
/// The base resource is loaded first through the configured
/// [`ResourceLoader`]; a missing or corrupt base resource is logged and the
/// settings start empty. Overlays are then merged in registration order,
/// later overlays overriding earlier ones key by key. Override sources are
/// consulted on every read ahead of all of the above.
///
/// ## Example
///
/// ```no_run
/// use dc_settings::{EnvOverrides, Settings, keys};
///
/// let settings = Settings::builder()
///     .with_overrides(EnvOverrides::new("DC", "__"))
///     .with_file("/etc/dependency-check/site.toml", false)
///     .build()?;
///
/// let threads = settings.get_int_or(keys::MAX_DOWNLOAD_THREAD_POOL_SIZE, 3);
/// # Ok::<(), dc_settings::ConfigError>(())
/// ```
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsBuilder {
    loader: Arc<dyn ResourceLoader>,
    resource: String,
    overlays: Vec<Overlay>,
    overrides: Vec<Arc<dyn OverrideSource>>,
    artifact_location: Option<String>,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            loader: Arc::new(EmbeddedResources::default()),
            resource: DEFAULT_RESOURCE.to_string(),
            overlays: Vec::new(),
            overrides: Vec::new(),
            artifact_location: None,
        }
    }
}

impl std::fmt::Debug for SettingsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsBuilder")
            .field("resource", &self.resource)
            .field("overlays", &self.overlays)
            .field("overrides", &self.overrides)
            .field("artifact_location", &self.artifact_location)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Creates a new settings builder.
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }
}

impl SettingsBuilder {
    /// Replaces the loader used to fetch the base resource.
    pub fn with_loader(self, loader: impl ResourceLoader + 'static) -> Self {
        self.with_shared_loader(Arc::new(loader))
    }

    pub fn with_shared_loader(mut self, loader: Arc<dyn ResourceLoader>) -> Self {
        self.loader = loader;
        self
    }

    /// Names the base resource. Defaults to [`DEFAULT_RESOURCE`].
    pub fn with_resource(mut self, name: impl Into<String>) -> Self {
        self.resource = name.into();
        self
    }

    /// Adds a TOML file overlay.
    ///
    /// If `required` is `true`, the build fails when the file can't be read.
    /// Optional files that are missing are skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.overlays.push(Overlay::File(FileSource::new(path, required)));
        self
    }

    /// Adds an already parsed overlay.
    pub fn with_table(mut self, table: Table) -> Self {
        self.overlays.push(Overlay::Table(table));
        self
    }

    /// Reads an overlay from `reader` immediately.
    pub fn with_reader(self, reader: impl Read) -> Result<Self, ConfigError> {
        Ok(self.with_table(read_stream(reader)?))
    }

    /// Appends an override source. Earlier sources take priority.
    pub fn with_overrides(self, source: impl OverrideSource + 'static) -> Self {
        self.with_shared_overrides(Arc::new(source))
    }

    pub fn with_shared_overrides(mut self, source: Arc<dyn OverrideSource>) -> Self {
        self.overrides.push(source);
        self
    }

    /// Sets the percent-encoded location of the running artifact, used to
    /// resolve `[APP]` paths. Defaults to the current executable.
    pub fn with_artifact_location(mut self, location: impl Into<String>) -> Self {
        self.artifact_location = Some(location.into());
        self
    }

    /// Like [`with_artifact_location`](Self::with_artifact_location) for a plain path.
    pub fn with_artifact_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.with_artifact_location(urlencoding::encode(&path.to_string_lossy()).into_owned())
    }

    /// Loads the base resource and merges every overlay.
    ///
    /// Only overlay failures are returned; base resource failures are logged.
    pub fn build(self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::load(
            self.loader.as_ref(),
            &self.resource,
            self.overrides,
            self.artifact_location,
        );

        for overlay in self.overlays {
            match overlay {
                Overlay::File(source) => {
                    if let Some(table) = source.load()? {
                        tracing::debug!(path = %source.path().display(), "merging settings file");
                        settings.merge_table(table)?;
                    }
                }
                Overlay::Table(table) => {
                    settings.merge_table(table)?;
                }
            }
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MapOverrides;
    use crate::config::keys;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn loader(contents: &'static str) -> EmbeddedResources {
        EmbeddedResources::empty().with(DEFAULT_RESOURCE, contents)
    }

    #[test]
    fn test_builder_debug_hides_overlay_values() {
        let table: Table = toml::from_str("[proxy]\npassword = \"hunter2\"").unwrap();
        let builder = Settings::builder().with_table(table);

        let rendered = format!("{builder:?}");

        assert!(!rendered.contains("hunter2"), "{rendered}");
        assert!(rendered.contains("proxy"), "{rendered}");
    }

    #[test]
    fn test_default_build_uses_embedded_defaults() {
        let settings = Settings::builder().build().unwrap();

        assert_eq!(settings.get_string(keys::DB_FILE_NAME).as_deref(), Some("dc.h2.db"));
        assert!(settings.get_boolean(keys::ANALYZER_PLATFORM_ENABLED).unwrap());
        assert_eq!(settings.get_int(keys::CVE_START_YEAR).unwrap(), 2002);
        assert_eq!(
            settings.get_int(keys::CVE_MODIFIED_VALID_FOR_DAYS).unwrap(),
            7
        );
        assert!(settings.get_string(keys::CVE_MODIFIED_20_URL).is_some());
    }

    #[test]
    fn test_overlays_apply_in_order() {
        let mut first = NamedTempFile::new().unwrap();
        writeln!(first, "k = \"file\"\nonly_file = \"x\"").unwrap();

        let settings = Settings::builder()
            .with_loader(loader("k = \"base\"\nonly_base = \"y\""))
            .with_file(first.path(), true)
            .with_reader("k = \"stream\"".as_bytes())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(settings.get_string("k").as_deref(), Some("stream"));
        assert_eq!(settings.get_string("only_file").as_deref(), Some("x"));
        assert_eq!(settings.get_string("only_base").as_deref(), Some("y"));
    }

    #[test]
    fn test_missing_required_overlay_fails() {
        let result = Settings::builder()
            .with_file("/nonexistent/site.toml", true)
            .build();

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_missing_optional_overlay_skipped() {
        let settings = Settings::builder()
            .with_loader(loader("k = \"base\""))
            .with_file("/nonexistent/site.toml", false)
            .build()
            .unwrap();

        assert_eq!(settings.get_string("k").as_deref(), Some("base"));
    }

    #[test]
    fn test_missing_base_resource_starts_empty() {
        let settings = Settings::builder()
            .with_loader(EmbeddedResources::empty())
            .build()
            .unwrap();

        assert!(settings.store().is_empty());
    }

    #[test]
    fn test_named_resource() {
        let settings = Settings::builder()
            .with_loader(EmbeddedResources::empty().with("alt.toml", "k = \"alt\""))
            .with_resource("alt.toml")
            .build()
            .unwrap();

        assert_eq!(settings.get_string("k").as_deref(), Some("alt"));
    }

    #[test]
    fn test_overrides_beat_overlays() {
        let settings = Settings::builder()
            .with_loader(loader("k = \"base\""))
            .with_table(toml::from_str("k = \"overlay\"").unwrap())
            .with_overrides(MapOverrides::new().with("k", "override"))
            .build()
            .unwrap();

        assert_eq!(settings.get_string("k").as_deref(), Some("override"));
    }

    #[test]
    fn test_artifact_path_is_encoded_then_decoded() {
        let settings = Settings::builder()
            .with_loader(loader("[data]\ndirectory = \"[APP]/data\""))
            .with_artifact_path("/opt/dc tool/bin/dc")
            .build()
            .unwrap();

        assert_eq!(
            settings.get_data_file(keys::DATA_DIRECTORY).unwrap(),
            PathBuf::from("/opt/dc tool/bin/data")
        );
    }
}
