//! Error types for model loading.
//!
//! Loading fails in one of two ways:
//!
//! - [`ParseError`]: the file cannot be read or is not valid JSON.
//! - [`SchemaError`]: the JSON is well formed but does not describe a valid
//!   network. Every variant names the offending element.
//!
//! [`LoadError`] wraps both for callers of [`load`](crate::load) and
//! [`from_str`](crate::from_str).

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Identifies the model element an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRef {
    Population(String),
    Projection(String),
    Input(String),
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Population(id) => write!(f, "population `{id}`"),
            Self::Projection(id) => write!(f, "projection `{id}`"),
            Self::Input(id) => write!(f, "input `{id}`"),
        }
    }
}

/// The model text could not be obtained or is not JSON.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read model file `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The JSON document does not describe a structurally valid network.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("model document must be a JSON object")]
    NotAnObject,

    #[error("missing required `{section}` section")]
    MissingSection { section: &'static str },

    #[error("`{section}` section must be {expected}")]
    MalformedSection {
        section: &'static str,
        expected: &'static str,
    },

    #[error("{element} is malformed: {reason}")]
    MalformedEntry { element: ElementRef, reason: String },

    #[error("{element} is missing required field `{field}`")]
    MissingField {
        element: ElementRef,
        field: &'static str,
    },

    #[error("{element} references undefined population `{population}`")]
    UndefinedPopulation {
        element: ElementRef,
        population: String,
    },

    #[error("{element} references undefined input source `{input_source}`")]
    UndefinedInputSource {
        element: ElementRef,
        input_source: String,
    },

    #[error("population `{population}` has non-positive size {size}")]
    NonPositiveSize { population: String, size: f64 },

    #[error("{element} has an invalid `{field}`: {reason}")]
    InvalidField {
        element: ElementRef,
        field: &'static str,
        reason: String,
    },
}

impl SchemaError {
    /// The element this error refers to, when it concerns a single element.
    pub fn element(&self) -> Option<ElementRef> {
        match self {
            Self::MalformedEntry { element, .. }
            | Self::MissingField { element, .. }
            | Self::UndefinedPopulation { element, .. }
            | Self::UndefinedInputSource { element, .. }
            | Self::InvalidField { element, .. } => Some(element.clone()),
            Self::NonPositiveSize { population, .. } => {
                Some(ElementRef::Population(population.clone()))
            }
            Self::NotAnObject | Self::MissingSection { .. } | Self::MalformedSection { .. } => None,
        }
    }
}

/// Any failure of [`load`](crate::load) or [`from_str`](crate::from_str).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ref_display() {
        assert_eq!(
            ElementRef::Projection("AtoB".to_string()).to_string(),
            "projection `AtoB`"
        );
    }

    #[test]
    fn test_undefined_population_message_names_both_ends() {
        let err = SchemaError::UndefinedPopulation {
            element: ElementRef::Projection("proj0".to_string()),
            population: "C".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "projection `proj0` references undefined population `C`"
        );
        assert_eq!(
            err.element(),
            Some(ElementRef::Projection("proj0".to_string()))
        );
    }

    #[test]
    fn test_non_positive_size_element() {
        let err = SchemaError::NonPositiveSize {
            population: "A".to_string(),
            size: -3.0,
        };
        assert_eq!(err.to_string(), "population `A` has non-positive size -3");
        assert_eq!(err.element(), Some(ElementRef::Population("A".to_string())));
    }
}
