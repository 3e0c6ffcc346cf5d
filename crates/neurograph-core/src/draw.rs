//! Visual definitions for network diagram elements.
//!
//! - [`StrokeDefinition`] / [`StrokeStyle`] - line color, width and dash pattern
//! - [`NodeShape`] - outline used for a population or input node
//! - [`ArrowHead`] - marker drawn at an edge endpoint

mod arrow;
mod shape;
mod stroke;

pub use arrow::ArrowHead;
pub use shape::NodeShape;
pub use stroke::{StrokeDefinition, StrokeStyle};
