//! CLI argument definitions.

use crate::config::RunMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Organize camera-trap images and keep the ones `SpeciesNet` finds animals in.
#[derive(Debug, Parser)]
#[command(name = "camtrap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Folder containing the images to process.
    ///
    /// A folder named `config` must be given as `./config`.
    pub input_folder: Option<PathBuf>,

    /// Options for a processing run.
    #[command(flatten)]
    pub run: RunArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for a processing run.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Run name (default: current timestamp).
    #[arg(long, env = "CAMTRAP_RUN_NAME")]
    pub run_name: Option<String>,

    /// Configuration file (default: platform config directory).
    #[arg(long, env = "CAMTRAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that holds the run directories.
    #[arg(short, long, env = "CAMTRAP_OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Minimum detection confidence for an image to be kept (0.0-1.0).
    #[arg(short = 'c', long, value_parser = parse_confidence, env = "CAMTRAP_CONFIDENCE")]
    pub confidence: Option<f64>,

    /// Model identifier passed to `SpeciesNet`.
    #[arg(short, long, env = "CAMTRAP_MODEL")]
    pub model: Option<String>,

    /// Python interpreter with `SpeciesNet` installed.
    #[arg(long, env = "CAMTRAP_PYTHON")]
    pub python: Option<PathBuf>,

    /// Inference batch size.
    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..), env = "CAMTRAP_BATCH_SIZE")]
    pub batch_size: Option<usize>,

    /// How the model parallelizes its work.
    #[arg(long, value_enum, env = "CAMTRAP_RUN_MODE")]
    pub run_mode: Option<RunMode>,

    /// ISO 3166-1 alpha-3 country code for geographic filtering (e.g. USA).
    #[arg(long, env = "CAMTRAP_COUNTRY")]
    pub country: Option<String>,

    /// First-level administrative region (e.g. MT), requires --country.
    #[arg(long, requires = "country", env = "CAMTRAP_ADMIN1_REGION")]
    pub admin1_region: Option<String>,

    /// Enable geofencing of species predictions.
    #[arg(long)]
    pub geofence: bool,

    /// Skip rendering bounding-box images.
    #[arg(long)]
    pub no_visualize: bool,

    /// Hide progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate confidence value.
fn parse_confidence(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "confidence must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}
