//! Predictions document model.
//!
//! Only the fields this crate reads are typed. Everything else the model
//! emits is kept in `extra` so a document survives a load/save cycle intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Top-level predictions document produced by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionsDocument {
    /// One record per processed image.
    #[serde(default)]
    pub predictions: Vec<PredictionRecord>,

    /// Untyped top-level fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Model output for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    /// Path of the image the record describes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filepath: Option<String>,

    /// Detector output. Absent means no detections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detections: Option<Vec<Detection>>,

    /// Final ensemble label, e.g. a taxonomy string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,

    /// Score of the final label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_score: Option<f64>,

    /// Untyped per-record fields (classifications, failures, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionRecord {
    /// Detections, treating an absent list as empty.
    pub fn detections(&self) -> &[Detection] {
        self.detections.as_deref().unwrap_or_default()
    }

    /// Source path, if the record names one.
    pub fn path(&self) -> Option<&Path> {
        self.filepath.as_deref().map(Path::new)
    }

    /// Highest detection confidence, or `None` without detections.
    pub fn max_confidence(&self) -> Option<f64> {
        self.detections()
            .iter()
            .map(|d| d.conf)
            .max_by(f64::total_cmp)
    }
}

/// One detector localization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Confidence in `[0, 1]`. Absent means zero.
    #[serde(default)]
    pub conf: f64,

    /// Detector category id (`"1"` animal, `"2"` person, `"3"` vehicle).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Human-readable category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Normalized `[x_min, y_min, width, height]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,

    /// Untyped per-detection fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
