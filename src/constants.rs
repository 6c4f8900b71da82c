//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "camtrap";

/// Default minimum confidence for a detection to keep its image.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.15;

/// Default model identifier passed to `SpeciesNet`.
pub const DEFAULT_MODEL: &str = "kaggle:google/speciesnet/pyTorch/v4.0.1a";

/// Default Python interpreter used to launch the model.
pub const DEFAULT_PYTHON: &str = "python3";

/// Default batch size for inference.
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// Default root directory for run output.
pub const DEFAULT_OUTPUT_ROOT: &str = "runs";

/// Default outline width for rendered boxes, in pixels.
pub const DEFAULT_LINE_WIDTH: u32 = 4;

/// Widest accepted box outline, in pixels.
pub const MAX_LINE_WIDTH: u32 = 64;

/// Format used for timestamp file names and default run names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Supported image extensions (lowercase, without dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Run directory layout.
pub mod layout {
    /// Prefix for run directory names.
    pub const RUN_PREFIX: &str = "run_";
    /// Staging directory for renamed copies.
    pub const STAGING_DIR: &str = "unprocessed_images";
    /// Raw model predictions file.
    pub const PREDICTIONS_FILE: &str = "out.json";
    /// Images that passed the confidence filter.
    pub const DETECTIONS_DIR: &str = "detections";
    /// Rendered bounding-box images.
    pub const VISUALIZATION_DIR: &str = "detections_bboxes";
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f64 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f64 = 1.0;
}

/// `SpeciesNet` command-line invocation.
pub mod speciesnet {
    /// Python module that runs the model.
    pub const RUN_MODULE: &str = "speciesnet.scripts.run_model";
    /// Instances file name inside the scratch directory.
    pub const INSTANCES_FILE: &str = "instances.json";
    /// Predictions file name inside the scratch directory.
    pub const PREDICTIONS_FILE: &str = "predictions.json";
}

/// Detection category identifiers emitted by the detector.
pub mod category {
    /// Animal.
    pub const ANIMAL: &str = "1";
    /// Person.
    pub const PERSON: &str = "2";
    /// Vehicle.
    pub const VEHICLE: &str = "3";
}
