//! End-to-end batch run over one input folder.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::inference::{Classifier, Location, prepare_instances};
use crate::ingest::{discover, stage_and_rename};
use crate::output::Visualizer;
use crate::pipeline::layout::{RunLayout, create_dir};
use crate::pipeline::staging::StagingDir;
use crate::predictions::{filter_by_confidence, save_predictions};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Run output directory.
    pub run_dir: PathBuf,
    /// Images found in the input folder.
    pub discovered: usize,
    /// Images copied into staging.
    pub staged: usize,
    /// Images that passed the confidence filter.
    pub accepted: usize,
    /// Images rendered with boxes, `None` when visualization was off.
    pub rendered: Option<usize>,
    /// Wall-clock duration in seconds.
    pub duration_secs: f64,
}

/// Orchestrates staging, inference, filtering and visualization.
pub struct Pipeline<'a> {
    config: &'a Config,
    classifier: &'a dyn Classifier,
    visualizer: Option<&'a dyn Visualizer>,
    progress_enabled: bool,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with the given configuration and model backend.
    pub fn new(config: &'a Config, classifier: &'a dyn Classifier) -> Self {
        Self {
            config,
            classifier,
            visualizer: None,
            progress_enabled: false,
        }
    }

    /// Render detections with `visualizer` after filtering.
    #[must_use]
    pub fn with_visualizer(mut self, visualizer: &'a dyn Visualizer) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Show progress bars.
    #[must_use]
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress_enabled = enabled;
        self
    }

    /// Run the whole pipeline over `input` as run `run_name`.
    ///
    /// Fails with [`Error::InputFolderNotFound`] before touching the output
    /// root if `input` is missing or not a directory. Any other error aborts the run and leaves
    /// what was already written in place.
    pub fn run(&self, input: &Path, run_name: &str) -> Result<RunSummary> {
        let start = Instant::now();
        let threshold = self.config.defaults.confidence_threshold;

        if !input.is_dir() {
            return Err(Error::InputFolderNotFound {
                path: input.to_path_buf(),
            });
        }

        let layout = RunLayout::new(&self.config.defaults.output_root, run_name);
        create_dir(&layout.root)?;

        info!("Scanning for image files...");
        let images = discover(input)?;
        let discovered = images.len();
        info!("Found {discovered} image file(s). Copying and renaming...");

        let staging = StagingDir::create(&layout.staging)?;
        let staged = stage_and_rename(&images, staging.path(), self.progress_enabled)?.len();

        let location = Location {
            country: self.config.model.country.clone(),
            admin1_region: self.config.model.admin1_region.clone(),
        };
        let instances = prepare_instances(staging.path(), &location)?;

        let predictions = self.classifier.predict(&instances)?;
        save_predictions(&predictions, &layout.predictions)?;
        info!(
            "Processing complete. Predictions saved to {}",
            layout.predictions.display()
        );

        create_dir(&layout.detections)?;
        let accepted = filter_by_confidence(
            &predictions,
            &layout.detections,
            threshold,
            self.progress_enabled,
        )?;

        let rendered = match self.visualizer {
            Some(visualizer) => {
                info!("Visualizing results...");
                create_dir(&layout.visualizations)?;
                Some(visualizer.render(&predictions, &layout.visualizations, threshold)?)
            }
            None => None,
        };

        staging.remove()?;

        let summary = RunSummary {
            run_dir: layout.root,
            discovered,
            staged,
            accepted,
            rendered,
            duration_secs: start.elapsed().as_secs_f64(),
        };
        info!(
            "Complete: {} staged, {} detections, {} non-detections in {:.2}s",
            summary.staged,
            summary.accepted,
            summary.staged.saturating_sub(summary.accepted),
            summary.duration_secs
        );
        info!(
            "All done! See output folder for results: {}",
            summary.run_dir.display()
        );

        Ok(summary)
    }
}
