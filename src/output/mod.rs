//! Run output: progress reporting and detection visualizations.

pub mod progress;
mod visualize;

pub use visualize::{BoxRenderer, Visualizer};
