//! Run directory layout.

use crate::constants::{TIMESTAMP_FORMAT, layout};
use crate::error::{Error, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

/// Paths that make up one run's output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    /// `<output_root>/run_<name>`.
    pub root: PathBuf,
    /// Renamed copies fed to the model; removed when the run finishes.
    pub staging: PathBuf,
    /// Raw model predictions.
    pub predictions: PathBuf,
    /// Images that passed the confidence filter.
    pub detections: PathBuf,
    /// Rendered bounding boxes.
    pub visualizations: PathBuf,
}

impl RunLayout {
    /// Compute the layout for `run_name` under `output_root`.
    pub fn new(output_root: &Path, run_name: &str) -> Self {
        let root = output_root.join(format!("{}{run_name}", layout::RUN_PREFIX));
        Self {
            staging: root.join(layout::STAGING_DIR),
            predictions: root.join(layout::PREDICTIONS_FILE),
            detections: root.join(layout::DETECTIONS_DIR),
            visualizations: root.join(layout::VISUALIZATION_DIR),
            root,
        }
    }
}

/// Default run name: the current local time.
pub fn default_run_name() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Create a directory and its parents if missing.
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
