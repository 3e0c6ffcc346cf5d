//! Error types for neurograph operations.
//!
//! [`NeurographError`] wraps every failure of a render run, from reading the
//! model file to writing the SVG. [`ConfigError`] is raised while options
//! are validated, before any model is read.

use std::{io, path::PathBuf};

use thiserror::Error;

use neurograph_model::{LoadError, ParseError, SchemaError};

/// An option value that is unknown or out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown {option} `{value}`, valid values: {expected}")]
    UnknownValue {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{option} must be {requirement}, got {value}")]
    OutOfRange {
        option: &'static str,
        value: f32,
        requirement: &'static str,
    },

    #[error("invalid {option}: {reason}")]
    InvalidColor {
        option: &'static str,
        reason: String,
    },

    #[error("unsupported output format `{format}`, only `svg` is supported")]
    UnsupportedFormat { format: String },

    #[error("invalid configuration file `{}`: {reason}", .path.display())]
    InvalidFile { path: PathBuf, reason: String },

    #[error("missing configuration file `{}`", .path.display())]
    MissingFile { path: PathBuf },
}

/// The main error type for neurograph operations.
#[derive(Debug, Error)]
pub enum NeurographError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Parse(ParseError),

    #[error(transparent)]
    Schema(SchemaError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<LoadError> for NeurographError {
    fn from(error: LoadError) -> Self {
        match error {
            LoadError::Parse(err) => Self::Parse(err),
            LoadError::Schema(err) => Self::Schema(err),
        }
    }
}

impl From<crate::export::Error> for NeurographError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
