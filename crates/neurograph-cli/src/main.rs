//! Neurograph CLI entry point.

use std::{fs, process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use neurograph_cli::{Args, error_adapter::ErrorAdapter};

fn main() {
    // Readable panic reports from the start
    miette::set_panic_hook();

    // Parse arguments before anything else
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    // Logger honors RUST_LOG, with the flag as the default level
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting neurograph");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = neurograph_cli::run(&args) {
        // The model text lets JSON errors point at the offending line
        let source = fs::read_to_string(&args.input).ok();
        let reportable = ErrorAdapter::new(&err, source.as_deref());

        let mut writer = String::new();
        let rendered = miette::GraphicalReportHandler::new().render_report(&mut writer, &reportable);
        match rendered {
            Ok(()) => error!("{writer}"),
            Err(_) => error!("{err}"),
        }

        process::exit(1);
    }

    info!("Completed successfully");
}
