//! Lifecycle of the settings bound to one execution context.

mod temp;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    keys, EmbeddedResources, OverrideSource, ResourceLoader, Settings, DEFAULT_RESOURCE,
};
use crate::Error;

pub use temp::TEMP_DIRECTORY_NAME;
use temp::TempDirectory;

const DEFAULT_RETRY_PAUSE: Duration = Duration::from_secs(2);

/// Owns the [`Settings`] of one execution context and the temporary
/// directory handed out to it.
///
/// Each context holds its own binding; nothing is shared between contexts
/// except the read-only override sources. Reading before
/// [`initialize`](Self::initialize) or after [`cleanup`](Self::cleanup)
/// returns [`Error::NotInitialized`].
///
/// ## Example
///
/// ```no_run
/// use dc_settings::{SettingsContext, keys};
///
/// let mut ctx = SettingsContext::new();
/// ctx.initialize();
///
/// let scratch = ctx.temp_directory()?;
/// let conn = ctx
///     .settings()?
///     .connection_string(keys::DB_CONNECTION_STRING, Some(keys::DB_FILE_NAME))?;
///
/// ctx.cleanup();
/// # Ok::<(), dc_settings::Error>(())
/// ```
pub struct SettingsContext {
    loader: Arc<dyn ResourceLoader>,
    overrides: Vec<Arc<dyn OverrideSource>>,
    artifact_location: Option<String>,
    retry_pause: Duration,
    settings: Option<Settings>,
    temp: TempDirectory,
}

impl std::fmt::Debug for SettingsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsContext")
            .field("overrides", &self.overrides)
            .field("artifact_location", &self.artifact_location)
            .field("retry_pause", &self.retry_pause)
            .field("settings", &self.settings)
            .field("temp", &self.temp)
            .finish_non_exhaustive()
    }
}

impl Default for SettingsContext {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SettingsContext {
    /// An uninitialized context using the embedded default resources.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SettingsContextBuilder {
        SettingsContextBuilder::default()
    }

    /// Binds fresh settings loaded from the default resource.
    pub fn initialize(&mut self) {
        self.initialize_with(DEFAULT_RESOURCE);
    }

    /// Binds fresh settings loaded from `resource`, replacing any prior binding.
    ///
    /// A resource that can't be loaded is logged and yields empty settings.
    pub fn initialize_with(&mut self, resource: &str) {
        let settings = Settings::load(
            self.loader.as_ref(),
            resource,
            self.overrides.clone(),
            self.artifact_location.clone(),
        );
        self.settings = Some(settings);
    }

    pub fn is_initialized(&self) -> bool {
        self.settings.is_some()
    }

    pub fn settings(&self) -> Result<&Settings, Error> {
        self.settings.as_ref().ok_or(Error::NotInitialized)
    }

    pub fn settings_mut(&mut self) -> Result<&mut Settings, Error> {
        self.settings.as_mut().ok_or(Error::NotInitialized)
    }

    /// Returns `<temp root>/dctemp`, creating it if needed.
    ///
    /// The root is [`keys::TEMP_DIRECTORY`] or the platform temp directory.
    /// The result becomes the directory removed by [`cleanup`](Self::cleanup),
    /// replacing whatever was tracked before.
    pub fn temp_directory(&self) -> Result<PathBuf, Error> {
        let root = self.temp_root()?;
        Ok(self.temp.materialize(&root)?)
    }

    fn temp_root(&self) -> Result<PathBuf, Error> {
        Ok(self
            .settings()?
            .get_file(keys::TEMP_DIRECTORY)
            .unwrap_or_else(std::env::temp_dir))
    }

    /// The directory [`cleanup`](Self::cleanup) would delete, if any.
    pub fn tracked_temp_directory(&self) -> Option<PathBuf> {
        self.temp.tracked()
    }

    /// Deletes the temporary directory and detaches the settings.
    pub fn cleanup(&mut self) {
        self.cleanup_with(true);
    }

    /// Detaches the settings, optionally deleting the temporary directory first.
    ///
    /// Never fails; problems are only logged.
    pub fn cleanup_with(&mut self, delete_temporary: bool) {
        if delete_temporary {
            self.temp.remove(self.retry_pause);
        }
        if self.settings.take().is_none() {
            tracing::debug!("cleanup called on an uninitialized settings context");
        }
    }
}

/// Builder for a [`SettingsContext`].
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsContextBuilder {
    loader: Arc<dyn ResourceLoader>,
    overrides: Vec<Arc<dyn OverrideSource>>,
    artifact_location: Option<String>,
    retry_pause: Duration,
}

impl Default for SettingsContextBuilder {
    fn default() -> Self {
        Self {
            loader: Arc::new(EmbeddedResources::default()),
            overrides: Vec::new(),
            artifact_location: None,
            retry_pause: DEFAULT_RETRY_PAUSE,
        }
    }
}

impl std::fmt::Debug for SettingsContextBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsContextBuilder")
            .field("overrides", &self.overrides)
            .field("artifact_location", &self.artifact_location)
            .field("retry_pause", &self.retry_pause)
            .finish_non_exhaustive()
    }
}

impl SettingsContextBuilder {
    pub fn with_loader(mut self, loader: impl ResourceLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Appends an override source shared by every settings this context binds.
    pub fn with_overrides(self, source: impl OverrideSource + 'static) -> Self {
        self.with_shared_overrides(Arc::new(source))
    }

    pub fn with_shared_overrides(mut self, source: Arc<dyn OverrideSource>) -> Self {
        self.overrides.push(source);
        self
    }

    /// See [`SettingsBuilder::with_artifact_location`](crate::SettingsBuilder::with_artifact_location).
    pub fn with_artifact_location(mut self, location: impl Into<String>) -> Self {
        self.artifact_location = Some(location.into());
        self
    }

    /// How long cleanup waits before its single retry. Defaults to two seconds.
    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    /// Builds an uninitialized context.
    pub fn build(self) -> SettingsContext {
        SettingsContext {
            loader: self.loader,
            overrides: self.overrides,
            artifact_location: self.artifact_location,
            retry_pause: self.retry_pause,
            settings: None,
            temp: TempDirectory::default(),
        }
    }
}
