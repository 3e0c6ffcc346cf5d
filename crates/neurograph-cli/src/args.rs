//! Command-line argument definitions for the neurograph CLI.
//!
//! Graph flags given here override the matching values of the
//! configuration file.

use clap::Parser;

/// Command-line arguments for the neurograph network drawing tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model (JSON)
    #[arg(help = "Path to the input model file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Label edges with weight, delay, probability and connection count
    #[arg(long)]
    pub show_info: bool,

    /// Node coloring (component-type, uniform, property)
    #[arg(long)]
    pub color_by: Option<String>,

    /// Layout algorithm (spring, circular, hierarchical)
    #[arg(long)]
    pub layout: Option<String>,

    /// Multiplier applied to the size-dependent part of node radii
    #[arg(long)]
    pub node_size_scale: Option<f32>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
