//! File-type analyzers that turn files into evidence-bearing dependencies.

mod platform;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ConfigError, Settings};
use crate::evidence::Dependency;

pub use platform::PlatformAnalyzer;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("dependency file not found: '{0}'")]
    FileNotFound(PathBuf),

    #[error("failed to read dependency file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An analyzer that handles files by extension and is toggled by a setting.
pub trait FileTypeAnalyzer {
    fn name(&self) -> &'static str;

    /// Boolean setting that turns this analyzer on or off.
    fn enabled_key(&self) -> &'static str;

    /// Lowercase extensions (without the dot) this analyzer accepts.
    fn extensions(&self) -> &'static [&'static str];

    fn analyze(&self, dependency: &Dependency) -> Result<Vec<Dependency>, AnalysisError>;

    fn is_enabled(&self, settings: &Settings) -> Result<bool, ConfigError> {
        settings.get_boolean(self.enabled_key())
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }
}
