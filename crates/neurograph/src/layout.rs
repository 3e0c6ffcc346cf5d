//! Node placement.
//!
//! A [`LayoutEngine`] assigns a center point to every node of a
//! [`NetworkGraph`]. [`engine_for`] picks the engine named by the render spec's
//! [`LayoutKind`]:
//!
//! - [`spring`]: force-directed simulation with a fixed seed
//! - [`circular`]: nodes evenly spaced on a circle
//! - [`hierarchical`]: Sugiyama layering along edge direction
//!
//! Coordinates are unbounded; the exporter translates the drawing into view.

pub mod circular;
pub mod hierarchical;
pub mod spring;

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use neurograph_core::{
    geometry::{Bounds, Point},
    render::LayoutKind,
};

use crate::{error::NeurographError, structure::NetworkGraph};

/// Node positions produced by a [`LayoutEngine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: HashMap<NodeIndex, Point>,
}

impl Layout {
    pub fn new(positions: HashMap<NodeIndex, Point>) -> Self {
        Self { positions }
    }

    /// Center of the node, if it was placed.
    pub fn position(&self, idx: NodeIndex) -> Option<Point> {
        self.positions.get(&idx).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounds covering every node outline, or `None` for an empty layout.
    pub fn bounds(&self, graph: &NetworkGraph<'_>) -> Option<Bounds> {
        graph
            .nodes()
            .filter_map(|(idx, node)| {
                self.position(idx)
                    .map(|center| Bounds::around(center, node.radius()))
            })
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// A node placement algorithm.
pub trait LayoutEngine {
    /// Places every node of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Layout`] if the algorithm fails.
    fn calculate(&self, graph: &NetworkGraph<'_>) -> Result<Layout, NeurographError>;
}

/// The engine for a layout kind, with default settings.
pub fn engine_for(kind: LayoutKind) -> Box<dyn LayoutEngine> {
    match kind {
        LayoutKind::Spring => Box::new(spring::Engine::new()),
        LayoutKind::Circular => Box::new(circular::Engine::new()),
        LayoutKind::Hierarchical => Box::new(hierarchical::Engine::new()),
    }
}

/// Largest node radius in the graph.
fn max_radius(graph: &NetworkGraph<'_>) -> f32 {
    graph
        .nodes()
        .map(|(_, node)| node.radius())
        .fold(0.0, f32::max)
}
