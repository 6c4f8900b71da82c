//! Confidence filtering of model results.

use crate::error::{Error, Result};
use crate::output::progress;
use crate::predictions::PredictionsDocument;
use std::path::Path;
use tracing::{debug, info};

/// Copy images whose best detection reaches `threshold` into `results_dir`.
///
/// A record takes part only when it names a file that still exists and has
/// at least one detection; anything else is skipped silently. Accepted files
/// keep their file name. Returns the number of images copied.
pub fn filter_by_confidence(
    doc: &PredictionsDocument,
    results_dir: &Path,
    threshold: f64,
    progress_enabled: bool,
) -> Result<usize> {
    let bar = progress::create_progress(
        doc.predictions.len(),
        "Filtering",
        "records",
        progress_enabled,
    );
    let mut accepted = 0;

    for record in &doc.predictions {
        progress::inc_progress(bar.as_ref());

        let Some(source) = record.path() else {
            debug!("Skipping record without filepath");
            continue;
        };
        let Some(max_conf) = record.max_confidence() else {
            debug!("No detections for {}", source.display());
            continue;
        };
        if !source.exists() {
            debug!("Skipping missing file {}", source.display());
            continue;
        }

        debug!("Max confidence for {}: {max_conf}", source.display());
        if max_conf < threshold {
            continue;
        }

        let Some(file_name) = source.file_name() else {
            continue;
        };
        let destination = results_dir.join(file_name);
        std::fs::copy(source, &destination).map_err(|e| Error::Copy {
            from: source.to_path_buf(),
            to: destination.clone(),
            source: e,
        })?;
        accepted += 1;
    }

    progress::finish_progress(bar, "Filtered");
    info!(
        "Total detections above confidence threshold {threshold}: {accepted} out of {} records",
        doc.predictions.len()
    );
    Ok(accepted)
}
