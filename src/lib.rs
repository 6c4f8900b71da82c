//! Camtrap - camera-trap image organizer and detection filter.
//!
//! This crate stages camera-trap images under capture-time names, runs a
//! species classification model over them, and keeps the images whose
//! detections clear a confidence threshold.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod inference;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod predictions;

use clap::Parser;
use cli::{Cli, Command, RunArgs};
use config::{Config, config_file_path, load_config, save_config, validate_config};
use inference::SpeciesNetCommand;
use output::BoxRenderer;
use pipeline::{Pipeline, default_run_name};
use std::path::Path;
use tracing::{info, warn};

pub use error::{Error, Result};

/// Main entry point for camtrap CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.run.verbose, cli.run.quiet);

    // Remove staged copies if the user aborts mid-run
    if let Err(e) = ctrlc::set_handler(|| {
        pipeline::cleanup_all_staging();
        std::process::exit(130); // 128 + SIGINT(2)
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    if let Some(Command::Config { action }) = cli.command {
        return handle_config_command(action, cli.run.config.as_deref());
    }

    let Some(input_folder) = cli.input_folder.as_deref() else {
        return Err(Error::ConfigValidation {
            message: "no input folder given (see --help)".to_string(),
        });
    };

    let mut config = load_config(cli.run.config.as_deref())?;
    apply_overrides(&mut config, &cli.run);
    validate_config(&config)?;

    let run_name = cli.run.run_name.clone().unwrap_or_else(default_run_name);
    let progress_enabled = !cli.run.quiet && !cli.run.no_progress;

    match process_folder(input_folder, &run_name, &config, progress_enabled) {
        Err(Error::InputFolderNotFound { path }) => {
            warn!(
                "Input folder {} does not exist or is not a directory. Please check the path.",
                path.display()
            );
            Ok(())
        }
        other => other,
    }
}

/// Process one input folder with the `SpeciesNet` backend.
fn process_folder(
    input_folder: &Path,
    run_name: &str,
    config: &Config,
    progress_enabled: bool,
) -> Result<()> {
    let classifier = SpeciesNetCommand::from_config(&config.model, progress_enabled);
    let renderer = BoxRenderer::new(config.output.line_width, progress_enabled);

    let mut pipeline = Pipeline::new(config, &classifier).with_progress(progress_enabled);
    if config.output.visualize {
        pipeline = pipeline.with_visualizer(&renderer);
    }

    let summary = pipeline.run(input_folder, run_name)?;
    if let Some(rendered) = summary.rendered {
        info!("Rendered {rendered} visualization(s)");
    }
    Ok(())
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(root) = &args.output_root {
        config.defaults.output_root.clone_from(root);
    }
    if let Some(threshold) = args.confidence {
        config.defaults.confidence_threshold = threshold;
    }
    if let Some(model) = &args.model {
        config.model.identifier.clone_from(model);
    }
    if let Some(python) = &args.python {
        config.model.python.clone_from(python);
    }
    if let Some(batch_size) = args.batch_size {
        config.model.batch_size = batch_size;
    }
    if let Some(run_mode) = args.run_mode {
        config.model.run_mode = run_mode;
    }
    if args.country.is_some() {
        config.model.country.clone_from(&args.country);
        config.model.admin1_region.clone_from(&args.admin1_region);
    }
    if args.geofence {
        config.model.geofence = true;
    }
    if args.no_visualize {
        config.output.visualize = false;
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

fn handle_config_command(action: cli::ConfigAction, explicit: Option<&Path>) -> Result<()> {
    use cli::ConfigAction;

    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config(Some(path.as_path()))?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use config::RunMode;
    use std::path::PathBuf;

    fn args(extra: &[&str]) -> RunArgs {
        let mut argv = vec!["camtrap", "input"];
        argv.extend_from_slice(extra);
        Cli::try_parse_from(argv).unwrap().run
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &args(&[]));
        assert_eq!(config.defaults.confidence_threshold, 0.15);
        assert!(config.output.visualize);
        assert!(config.model.country.is_none());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = Config::default();
        config.model.country = Some("CAN".to_string());
        apply_overrides(
            &mut config,
            &args(&[
                "-o",
                "/working_volume",
                "-c",
                "0.4",
                "--run-mode",
                "multi-process",
                "--country",
                "USA",
                "--admin1-region",
                "MT",
                "--no-visualize",
            ]),
        );

        assert_eq!(
            config.defaults.output_root,
            PathBuf::from("/working_volume")
        );
        assert_eq!(config.defaults.confidence_threshold, 0.4);
        assert_eq!(config.model.run_mode, RunMode::MultiProcess);
        assert_eq!(config.model.country.as_deref(), Some("USA"));
        assert_eq!(config.model.admin1_region.as_deref(), Some("MT"));
        assert!(!config.output.visualize);
    }
}
