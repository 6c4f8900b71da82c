//! Copying discovered images into the flat staging directory.

use crate::error::{Error, Result};
use crate::ingest::{ImageFile, derive_timestamp_name};
use crate::output::progress;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copy each image into `destination_dir` under its timestamp name.
///
/// When the timestamp name is already taken, the image's position in
/// `images` is appended to the stem (`<stem>_<index>.<ext>`). The suffix is
/// the traversal index rather than a per-name counter, so the same input
/// order always yields the same names. Sources are copied, never moved.
///
/// Returns the destination paths in input order. The first failed copy
/// aborts; files copied before it are left in place.
pub fn stage_and_rename(
    images: &[ImageFile],
    destination_dir: &Path,
    progress_enabled: bool,
) -> Result<Vec<PathBuf>> {
    let bar = progress::create_progress(images.len(), "Staging", "files", progress_enabled);
    let mut staged = Vec::with_capacity(images.len());

    for (index, image) in images.iter().enumerate() {
        let file_name = derive_timestamp_name(image);
        let mut destination = destination_dir.join(&file_name);

        if destination.exists() {
            destination = destination_dir.join(suffixed_name(&file_name, index));
            debug!(
                "Name {} taken, staging {} as {}",
                file_name,
                image.path.display(),
                destination.display()
            );
        }

        std::fs::copy(&image.path, &destination).map_err(|e| Error::Copy {
            from: image.path.clone(),
            to: destination.clone(),
            source: e,
        })?;

        staged.push(destination);
        progress::inc_progress(bar.as_ref());
    }

    progress::finish_progress(bar, "Staged");
    Ok(staged)
}

/// Insert `_<index>` between the stem and extension of a file name.
fn suffixed_name(file_name: &str, index: usize) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{index}.{ext}"),
        None => format!("{file_name}_{index}"),
    }
}
