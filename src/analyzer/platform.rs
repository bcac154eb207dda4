use std::fs::File;
use std::io::{BufRead, BufReader};

use super::{AnalysisError, FileTypeAnalyzer};
use crate::config::keys;
use crate::evidence::{Confidence, Dependency, Evidence};

const SOURCE: &str = "platform";

/// Reads `.plt` files listing one `vendor,product,version` platform per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformAnalyzer;

impl FileTypeAnalyzer for PlatformAnalyzer {
    fn name(&self) -> &'static str {
        "Platform Analyzer"
    }

    fn enabled_key(&self) -> &'static str {
        keys::ANALYZER_PLATFORM_ENABLED
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["plt"]
    }

    fn analyze(&self, dependency: &Dependency) -> Result<Vec<Dependency>, AnalysisError> {
        let path = &dependency.actual_file_path;
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnalysisError::FileNotFound(path.clone()),
            _ => AnalysisError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        let mut found = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| AnalysisError::Io {
                path: path.clone(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let [vendor, product, version, ..] = fields.as_slice() else {
                tracing::warn!(
                    file = %path.display(),
                    line = index + 1,
                    "skipping platform entry without vendor, product and version"
                );
                continue;
            };

            let mut platform = Dependency {
                file_name: dependency.file_name.clone(),
                file_path: dependency.file_path.clone(),
                ..Dependency::default()
            };
            platform.add_vendor_evidence(Evidence::new(SOURCE, "vendor", *vendor, Confidence::High));
            platform.add_product_evidence(Evidence::new(SOURCE, "name", *product, Confidence::High));
            platform.add_version_evidence(Evidence::new(SOURCE, "version", *version, Confidence::High));
            found.push(platform);
        }

        tracing::debug!(file = %path.display(), count = found.len(), "platform entries found");
        Ok(found)
    }
}
