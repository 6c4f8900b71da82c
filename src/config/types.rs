//! Configuration type definitions.

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_LINE_WIDTH, DEFAULT_MODEL,
    DEFAULT_OUTPUT_ROOT, DEFAULT_PYTHON,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model invocation settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Default run settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the species classification model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier understood by `SpeciesNet`.
    pub identifier: String,

    /// Python interpreter used to launch the model.
    pub python: PathBuf,

    /// How the model parallelizes work internally.
    pub run_mode: RunMode,

    /// Batch size for inference.
    pub batch_size: usize,

    /// Apply geographic filtering to predictions.
    pub geofence: bool,

    /// ISO 3166-1 alpha-3 country code attached to every instance.
    pub country: Option<String>,

    /// First-level administrative region (e.g. US state), requires `country`.
    pub admin1_region: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            identifier: DEFAULT_MODEL.to_string(),
            python: PathBuf::from(DEFAULT_PYTHON),
            run_mode: RunMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            geofence: false,
            country: None,
            admin1_region: None,
        }
    }
}

/// Default run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Minimum max-detection confidence for an image to be kept.
    pub confidence_threshold: f64,

    /// Root directory that holds one `run_<name>` directory per run.
    pub output_root: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render bounding-box visualizations.
    pub visualize: bool,

    /// Outline width for rendered boxes, in pixels.
    pub line_width: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            visualize: true,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Model parallelism mode.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Run model components on worker threads.
    #[default]
    MultiThread,
    /// Run model components in separate processes.
    MultiProcess,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MultiThread => write!(f, "multi_thread"),
            Self::MultiProcess => write!(f, "multi_process"),
        }
    }
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "multi_thread" => Ok(Self::MultiThread),
            "multi_process" => Ok(Self::MultiProcess),
            other => Err(format!("unknown run mode: {other}")),
        }
    }
}
