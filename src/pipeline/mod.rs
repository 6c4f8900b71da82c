//! Run orchestration.

mod layout;
mod run;
mod staging;

pub use layout::{RunLayout, create_dir, default_run_name};
pub use run::{Pipeline, RunSummary};
pub use staging::{StagingDir, cleanup_all_staging};
