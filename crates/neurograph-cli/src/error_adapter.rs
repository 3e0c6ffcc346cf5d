//! Error adapter for converting NeurographError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every variant gets
//! a stable code such as `neurograph::schema`. Malformed JSON is additionally
//! shown as a labeled snippet of the model text when that text is available.

use std::{error::Error, fmt};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use neurograph::{
    ConfigError, NeurographError,
    model::{ParseError, SchemaError},
};

/// Adapter for a single [`NeurographError`].
pub struct ErrorAdapter<'a> {
    err: &'a NeurographError,
    /// Model text, for errors that point into it
    src: Option<&'a str>,
}

impl<'a> ErrorAdapter<'a> {
    /// Create a new adapter, optionally with the model text the error refers to.
    pub fn new(err: &'a NeurographError, src: Option<&'a str>) -> Self {
        Self { err, src }
    }

    fn json_error(&self) -> Option<&'a serde_json::Error> {
        match self.err {
            NeurographError::Parse(ParseError::Json(err)) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.err.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(error_code(self.err)))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_help(self.err).map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.json_error()?;
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let err = self.json_error()?;
        let span = json_span(self.src?, err.line(), err.column())?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Stable diagnostic code of an error.
pub fn error_code(err: &NeurographError) -> &'static str {
    match err {
        NeurographError::Io(_) => "neurograph::io",
        NeurographError::Parse(_) => "neurograph::parse",
        NeurographError::Schema(_) => "neurograph::schema",
        NeurographError::Config(_) => "neurograph::config",
        NeurographError::Graph(_) => "neurograph::graph",
        NeurographError::Layout(_) => "neurograph::layout",
        NeurographError::Export(_) => "neurograph::export",
    }
}

fn error_help(err: &NeurographError) -> Option<&'static str> {
    match err {
        NeurographError::Schema(SchemaError::UndefinedPopulation { .. }) => {
            Some("declare the population under `populations` or fix the reference")
        }
        NeurographError::Schema(SchemaError::UndefinedInputSource { .. }) => {
            Some("declare the source under `input_sources` or fix the reference")
        }
        NeurographError::Schema(SchemaError::NonPositiveSize { .. }) => {
            Some("population sizes must be positive numbers")
        }
        NeurographError::Schema(SchemaError::MissingSection { .. }) => {
            Some("a network needs both a `populations` and a `projections` section")
        }
        NeurographError::Config(ConfigError::UnsupportedFormat { .. }) => {
            Some("set `file_format = \"svg\"` in the [style] section")
        }
        NeurographError::Config(ConfigError::MissingFile { .. }) => {
            Some("pass an existing TOML file to `--config`")
        }
        NeurographError::Config(_) => Some("check the configuration file and command-line flags"),
        _ => None,
    }
}

/// Byte span of the character at 1-based `line` and `column` of `src`.
fn json_span(src: &str, line: usize, column: usize) -> Option<SourceSpan> {
    if line == 0 {
        return None;
    }

    let mut offset = 0;
    for text in src.split_inclusive('\n').take(line - 1) {
        offset += text.len();
    }
    let rest = src.get(offset..)?;
    let line_len = rest.find('\n').unwrap_or(rest.len());
    let offset = offset + column.saturating_sub(1).min(line_len);

    let len = src[offset..].chars().next().map_or(0, char::len_utf8);
    Some(SourceSpan::new(offset.into(), len))
}
