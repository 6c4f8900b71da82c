//! Configuration loading and management.

mod file;
mod types;
mod validate;

pub use file::{config_dir, config_file_path, load_config, load_config_file, save_config};
pub use types::{Config, DefaultsConfig, ModelConfig, OutputConfig, RunMode};
pub use validate::{validate_config, validate_threshold};
