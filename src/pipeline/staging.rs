//! Staging directory ownership and interrupt cleanup.

use crate::error::{Error, Result};
use crate::pipeline::layout::create_dir;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Guard for the staging directory of a run.
///
/// The directory is registered for removal on Ctrl+C while the guard is
/// alive. [`StagingDir::remove`] deletes it at the end of a successful run.
/// Dropping the guard without removing only unregisters it, so an aborted
/// run leaves its staged copies in place.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Create the staging directory and register it for interrupt cleanup.
    pub fn create(path: &Path) -> Result<Self> {
        create_dir(path)?;
        register_staging(path);
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the staging directory and everything in it.
    pub fn remove(self) -> Result<()> {
        info!("Cleaning up temporary files...");
        fs::remove_dir_all(&self.path).map_err(|e| Error::StagingRemove {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        unregister_staging(&self.path);
    }
}

/// Global registry of live staging directories for cleanup on signal.
static ACTIVE_STAGING: std::sync::LazyLock<std::sync::Mutex<Vec<PathBuf>>> =
    std::sync::LazyLock::new(|| std::sync::Mutex::new(Vec::new()));

fn register_staging(path: &Path) {
    if let Ok(mut dirs) = ACTIVE_STAGING.lock() {
        dirs.push(path.to_path_buf());
    }
}

fn unregister_staging(path: &Path) {
    if let Ok(mut dirs) = ACTIVE_STAGING.lock() {
        dirs.retain(|p| p != path);
    }
}

/// Remove all registered staging directories. Called on signal.
pub fn cleanup_all_staging() {
    if let Ok(dirs) = ACTIVE_STAGING.lock() {
        for dir in dirs.iter() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}

#[cfg(test)]
fn is_registered(path: &Path) -> bool {
    ACTIVE_STAGING
        .lock()
        .is_ok_and(|dirs| dirs.iter().any(|p| p == path))
}
