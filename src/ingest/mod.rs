//! Ingestion: discover images and stage them under timestamp names.

mod discover;
mod stage;
mod timestamp;

pub use discover::{ImageFile, discover};
pub use stage::stage_and_rename;
pub use timestamp::{capture_time, derive_timestamp_name, parse_exif_datetime};
