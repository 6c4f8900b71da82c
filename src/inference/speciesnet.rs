//! `SpeciesNet` backend run as an external Python process.

use crate::config::{ModelConfig, RunMode};
use crate::constants::speciesnet::{INSTANCES_FILE, PREDICTIONS_FILE, RUN_MODULE};
use crate::error::{Error, Result};
use crate::inference::{Classifier, InstancesDocument};
use crate::predictions::{PredictionsDocument, load_predictions, write_json};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Runs `python -m speciesnet.scripts.run_model` over an instances file.
#[derive(Debug, Clone)]
pub struct SpeciesNetCommand {
    python: PathBuf,
    model: String,
    run_mode: RunMode,
    batch_size: usize,
    geofence: bool,
    progress_bars: bool,
}

impl SpeciesNetCommand {
    /// Build the backend from model configuration.
    pub fn from_config(config: &ModelConfig, progress_bars: bool) -> Self {
        Self {
            python: config.python.clone(),
            model: config.identifier.clone(),
            run_mode: config.run_mode,
            batch_size: config.batch_size,
            geofence: config.geofence,
            progress_bars,
        }
    }

    /// Arguments passed to the interpreter.
    fn args(&self, instances_json: &Path, predictions_json: &Path) -> Vec<OsString> {
        let path_arg = |flag: &str, path: &Path| {
            let mut arg = OsString::from(flag);
            arg.push(path);
            arg
        };
        let bool_arg = |name: &str, on: bool| {
            OsString::from(if on {
                format!("--{name}")
            } else {
                format!("--no{name}")
            })
        };

        vec![
            OsString::from("-m"),
            OsString::from(RUN_MODULE),
            OsString::from(format!("--model={}", self.model)),
            path_arg("--instances_json=", instances_json),
            path_arg("--predictions_json=", predictions_json),
            OsString::from(format!("--run_mode={}", self.run_mode)),
            OsString::from(format!("--batch_size={}", self.batch_size)),
            bool_arg("geofence", self.geofence),
            bool_arg("progress_bars", self.progress_bars),
        ]
    }

    /// Run the interpreter, returning captured stderr on failure.
    fn run(&self, args: Vec<OsString>) -> Result<()> {
        let mut command = Command::new(&self.python);
        command.args(args).stdin(Stdio::null());
        debug!("Running {:?}", command);

        let launch_error = |e: std::io::Error| Error::Inference {
            reason: format!("failed to launch '{}': {e}", self.python.display()),
        };

        // Progress bars are drawn on stderr, so only capture it when hidden.
        let (status, stderr) = if self.progress_bars {
            (command.status().map_err(launch_error)?, String::new())
        } else {
            let output = command.output().map_err(launch_error)?;
            (
                output.status,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )
        };

        if status.success() {
            return Ok(());
        }

        let mut reason = format!("model process exited with {status}");
        if !stderr.is_empty() {
            reason.push_str(": ");
            reason.push_str(&stderr);
        }
        Err(Error::Inference { reason })
    }
}

impl Classifier for SpeciesNetCommand {
    fn predict(&self, instances: &InstancesDocument) -> Result<PredictionsDocument> {
        let scratch = tempfile::Builder::new().prefix("camtrap-").tempdir()?;
        let instances_json = scratch.path().join(INSTANCES_FILE);
        let predictions_json = scratch.path().join(PREDICTIONS_FILE);

        write_json(instances, &instances_json)?;

        info!(
            "Processing {} image(s) with {} ({}, batch size {})",
            instances.instances.len(),
            self.model,
            self.run_mode,
            self.batch_size
        );
        self.run(self.args(&instances_json, &predictions_json))?;

        load_predictions(&predictions_json).map_err(|e| Error::Inference {
            reason: format!("model produced no readable predictions: {e}"),
        })
    }
}
