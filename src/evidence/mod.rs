//! Evidence records attached to dependencies by analyzers.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Strength of a single piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
    Highest,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "LOW"),
            Confidence::Medium => write!(f, "MEDIUM"),
            Confidence::High => write!(f, "HIGH"),
            Confidence::Highest => write!(f, "HIGHEST"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Evidence {
    /// Where the evidence came from, e.g. `platform`.
    pub source: String,
    pub name: String,
    pub value: String,
    pub confidence: Confidence,
}

impl Evidence {
    pub fn new(
        source: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            source: source.into(),
            name: name.into(),
            value: value.into(),
            confidence,
        }
    }
}

/// A file under analysis, or a component discovered inside one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub file_name: String,
    pub file_path: String,
    /// The file actually read. Empty for components synthesised by analyzers.
    pub actual_file_path: PathBuf,
    pub vendor_evidence: Vec<Evidence>,
    pub product_evidence: Vec<Evidence>,
    pub version_evidence: Vec<Evidence>,
}

impl Dependency {
    /// A dependency backed by a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self {
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: path.to_string_lossy().into_owned(),
            actual_file_path: path.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn add_vendor_evidence(&mut self, evidence: Evidence) {
        self.vendor_evidence.push(evidence);
    }

    pub fn add_product_evidence(&mut self, evidence: Evidence) {
        self.product_evidence.push(evidence);
    }

    pub fn add_version_evidence(&mut self, evidence: Evidence) {
        self.version_evidence.push(evidence);
    }
}
