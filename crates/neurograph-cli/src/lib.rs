//! Neurograph CLI library
//!
//! This module contains the core CLI logic for the neurograph network
//! drawing tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use neurograph::{NetworkDiagram, NeurographError, RenderContext};

/// Run the neurograph CLI application
///
/// Loads the configuration, applies the command-line overrides, draws the
/// model given by `args.input` and writes the SVG to `args.output`.
///
/// # Errors
///
/// Returns `NeurographError` for:
/// - Configuration loading errors and invalid option values
/// - Unreadable or malformed model files
/// - Layout errors
/// - Rendering and file output errors
pub fn run(args: &Args) -> Result<(), NeurographError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing network model"
    );

    // Load configuration, then let flags override it
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args)?;

    // Draw the model
    let ctx = RenderContext::from_style(app_config.style())?;
    let diagram = NetworkDiagram::from_path(&args.input, app_config)?;
    let ctx = diagram.draw(ctx)?;

    // Write output file
    ctx.save(&args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
