//! Configuration file loading for the CLI
//!
//! This module finds and loads the TOML configuration file from an explicit
//! path, the local directory or the platform config directory, and applies
//! command-line overrides on top of it.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use neurograph::{
    ConfigError, NeurographError,
    config::{self, AppConfig, ColorBy},
};

use crate::Args;

/// Configuration file errors for the CLI
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Failed to parse TOML configuration {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigFileError> for ConfigError {
    fn from(err: ConfigFileError) -> Self {
        match err {
            ConfigFileError::Parse { path, reason } => ConfigError::InvalidFile { path, reason },
            ConfigFileError::MissingFile(path) => ConfigError::MissingFile { path },
        }
    }
}

impl From<ConfigFileError> for NeurographError {
    fn from(err: ConfigFileError) -> Self {
        NeurographError::Config(err.into())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (neurograph/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, NeurographError> {
    // 1. Try the explicitly provided path
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("neurograph/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "neurograph", "neurograph") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. Fall back to defaults
    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, NeurographError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigFileError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigFileError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(config)
}

/// Overlay the graph flags given on the command line.
///
/// # Errors
///
/// Returns [`NeurographError::Config`] for an unknown `--color-by` or
/// `--layout` name.
pub fn apply_overrides(config: AppConfig, args: &Args) -> Result<AppConfig, NeurographError> {
    let mut graph = config.graph().clone();

    // Flags win over the file; unset flags keep the file's value
    if args.show_info {
        graph = graph.with_show_info(true);
    }
    if let Some(name) = &args.color_by {
        graph = graph.with_color_by(name.parse::<ColorBy>()?);
    }
    if let Some(name) = &args.layout {
        graph = graph.with_layout(config::parse_layout(name)?);
    }
    if let Some(scale) = args.node_size_scale {
        graph = graph.with_node_size_scale(scale);
    }

    debug!(graph:?; "Graph options after overrides");
    Ok(AppConfig::new(graph, config.style().clone()))
}
