//! Model predictions: document model, persistence and filtering.

mod filter;
mod types;

pub use filter::filter_by_confidence;
pub use types::{Detection, PredictionRecord, PredictionsDocument};

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Load a predictions document from a JSON file.
pub fn load_predictions(path: &Path) -> Result<PredictionsDocument> {
    let file = File::open(path).map_err(|e| Error::PredictionsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::PredictionsParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write any serializable document as pretty-printed JSON.
pub fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.flush()?;
    Ok(())
}

/// Save a predictions document as pretty-printed JSON.
pub fn save_predictions(doc: &PredictionsDocument, path: &Path) -> Result<()> {
    write_json(doc, path)
}
