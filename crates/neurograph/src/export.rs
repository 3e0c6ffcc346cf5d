//! Export functionality for network diagrams.
//!
//! This module provides the [`Exporter`] trait that turns a laid-out
//! [`NetworkGraph`] into an output format. It is the final stage of the
//! pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON model
//!     ↓ load
//! NetworkModel
//!     ↓ style
//! RenderSpec
//!     ↓ structure
//! NetworkGraph
//!     ↓ layout
//! Layout
//!     ↓ export (this module)
//! RenderContext
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: draws into a [`RenderContext`](crate::RenderContext)
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`NeurographError::Export`](crate::NeurographError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use crate::{layout::Layout, structure::NetworkGraph};

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Draws a positioned network.
    ///
    /// # Arguments
    ///
    /// * `graph` - Nodes and edges with their visual attributes.
    /// * `layout` - Center point of every node.
    /// * `annotation` - Optional caption drawn above the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the network cannot be drawn.
    fn export_network(
        &mut self,
        graph: &NetworkGraph<'_>,
        layout: &Layout,
        annotation: Option<&str>,
    ) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A rendering failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
