use crate::analyzer::AnalysisError;
use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the dc-settings library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("settings context has not been initialized")]
    NotInitialized,
}
