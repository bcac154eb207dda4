//! File and stream overlays merged on top of the base resource.

use std::io::Read;
use std::path::{Path, PathBuf};

use toml::Table;

use super::ConfigError;

/// A settings overlay backed by a TOML file.
///
/// Required files that don't exist cause an error; optional files that don't
/// exist are skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist and the source is optional.
    pub fn load(&self) -> Result<Option<Table>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                    path: self.path.clone(),
                    detail: describe_parse_error(&contents, &e),
                })?;
                Ok(Some(table))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !self.required => {
                tracing::debug!(path = %self.path.display(), "optional settings file not found, skipping");
                Ok(None)
            }
            Err(e) => Err(ConfigError::ReadError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

/// Reads a TOML document from an arbitrary stream.
pub fn read_stream(mut reader: impl Read) -> Result<Table, ConfigError> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(ConfigError::StreamRead)?;
    toml::from_str(&contents)
        .map_err(|e| ConfigError::ParseStream(describe_parse_error(&contents, &e)))
}

/// Message and position of a TOML syntax error.
///
/// The rendered `toml::de::Error` quotes the offending source line, which can
/// hold a credential, so only the message and location are kept.
fn describe_parse_error(text: &str, error: &toml::de::Error) -> String {
    let Some(span) = error.span() else {
        return error.message().to_string();
    };
    let before = text.get(..span.start).unwrap_or(text);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    format!("{} at line {line}, column {column}", error.message())
}
