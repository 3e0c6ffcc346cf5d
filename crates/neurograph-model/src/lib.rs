//! Loader for NeuroMLlite-style network descriptions.
//!
//! This crate turns a JSON model document into a [`NetworkModel`]: an
//! immutable, fully normalized record of populations, projections and
//! inputs. Optional fields receive their defaults here, once, so consumers
//! never deal with absent values or alternative document shapes.
//!
//! # Accepted documents
//!
//! - A flat network object with `populations` and `projections` sections.
//! - A NeuroMLlite document that wraps the network under its id, e.g.
//!   `{"Example1": {"populations": {...}, "projections": {...}}}`.
//!
//! Projections may be a mapping (keys are projection ids) or a list.
//! Endpoints are read from `source`/`target` or from the NeuroMLlite names
//! `presynaptic`/`postsynaptic`.
//!
//! # Example
//!
//! ```
//! let model = neurograph_model::from_str(r#"{
//!     "populations": {"A": {"size": 10}, "B": {"component": "inh", "size": 5}},
//!     "projections": [{"source": "A", "target": "B", "weight": 1.0}]
//! }"#).unwrap();
//!
//! assert_eq!(model.populations().len(), 2);
//! assert_eq!(model.projections()[0].target(), "B");
//! ```

pub mod error;

mod loader;
mod model;

pub use error::{ElementRef, LoadError, ParseError, SchemaError};
pub use loader::{DEFAULT_COMPONENT, DEFAULT_POPULATION_SIZE, from_str, load};
pub use model::{Direction, Input, NetworkModel, Population, Projection, Quantity, Sign};
