//! Inference: the classifier seam and the instances it consumes.

mod speciesnet;

pub use speciesnet::SpeciesNetCommand;

use crate::error::Result;
use crate::ingest::discover;
use crate::predictions::PredictionsDocument;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A species classification backend.
///
/// Implementations run the model over every instance and return the
/// complete predictions document, or fail as a whole.
pub trait Classifier {
    /// Run the model over `instances`.
    fn predict(&self, instances: &InstancesDocument) -> Result<PredictionsDocument>;
}

/// Geographic hints attached to every instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// ISO 3166-1 alpha-3 country code.
    pub country: Option<String>,
    /// First-level administrative region, only used with a country.
    pub admin1_region: Option<String>,
}

/// One image submitted to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Path of the image.
    pub filepath: String,
    /// Country code, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Administrative region, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1_region: Option<String>,
}

/// Input document for the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstancesDocument {
    /// Images to process.
    pub instances: Vec<Instance>,
}

/// Build one instance per image found under `folder`.
///
/// Location fields are only attached when a country is given; a region
/// without a country is dropped.
pub fn prepare_instances(folder: &Path, location: &Location) -> Result<InstancesDocument> {
    let country = location.country.as_ref();
    let admin1_region = country.and(location.admin1_region.as_ref());

    let instances = discover(folder)?
        .into_iter()
        .map(|image| Instance {
            filepath: image.path.to_string_lossy().replace('\\', "/"),
            country: country.cloned(),
            admin1_region: admin1_region.cloned(),
        })
        .collect();

    Ok(InstancesDocument { instances })
}
