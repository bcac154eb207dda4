use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::ConfigError;

/// Name of the working directory created under the temp root.
pub const TEMP_DIRECTORY_NAME: &str = "dctemp";

/// The last temporary directory handed out by a context.
///
/// Only the most recent directory is remembered; if the configured root
/// changes between calls, earlier directories are left on disk.
#[derive(Debug, Default)]
pub(crate) struct TempDirectory {
    tracked: Mutex<Option<PathBuf>>,
}

impl TempDirectory {
    /// Creates `root/dctemp` if needed and starts tracking it.
    pub(crate) fn materialize(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let dir = root.join(TEMP_DIRECTORY_NAME);
        if !dir.is_dir() {
            std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
        }
        *self.lock() = Some(dir.clone());
        Ok(dir)
    }

    pub(crate) fn tracked(&self) -> Option<PathBuf> {
        self.lock().clone()
    }

    /// Deletes the tracked directory, retrying once after `pause`.
    ///
    /// Never fails. A directory that survives the retry stays tracked so a
    /// later cleanup can try again.
    pub(crate) fn remove(&self, pause: Duration) {
        let mut tracked = self.lock();
        let Some(dir) = tracked.take() else {
            return;
        };
        if !dir.exists() {
            return;
        }

        if let Err(e) = std::fs::remove_dir_all(&dir) {
            tracing::debug!(dir = %dir.display(), error = %e, "failed to delete temporary directory");
        }
        if dir.exists() {
            tracing::debug!(dir = %dir.display(), ?pause, "temporary directory still present, retrying");
            std::thread::sleep(pause);
            if let Err(e) = std::fs::remove_dir_all(&dir) {
                tracing::warn!(dir = %dir.display(), error = %e, "unable to delete temporary directory");
            }
        }
        if dir.exists() {
            *tracked = Some(dir);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PathBuf>> {
        self.tracked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
