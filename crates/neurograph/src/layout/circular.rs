//! Circular layout engine.
//!
//! Nodes sit on one circle in graph order, starting at the top and going
//! clockwise. The circle is made large enough that neighbouring outlines keep
//! at least `spacing` between them.

use std::f32::consts::{FRAC_PI_2, TAU};

use log::debug;

use neurograph_core::geometry::Point;

use super::{Layout, LayoutEngine, max_radius};
use crate::{error::NeurographError, structure::NetworkGraph};

/// Circular layout engine.
pub struct Engine {
    spacing: f32,
    min_radius: f32,
}

impl Engine {
    /// Create a new circular layout engine
    pub fn new() -> Self {
        Self {
            spacing: 40.0,
            min_radius: 150.0,
        }
    }

    /// Radius of the circle the node centers lie on.
    fn circle_radius(&self, count: usize, largest_node: f32) -> f32 {
        if count < 2 {
            return 0.0;
        }

        // Neighbouring centers are 2 r sin(pi / n) apart.
        let chord = 2.0 * largest_node + self.spacing;
        let needed = chord / (2.0 * (std::f32::consts::PI / count as f32).sin());
        needed.max(self.min_radius)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for Engine {
    fn calculate(&self, graph: &NetworkGraph<'_>) -> Result<Layout, NeurographError> {
        let count = graph.node_count();
        let radius = self.circle_radius(count, max_radius(graph));
        debug!(nodes = count, radius; "Running circular layout");

        let positions = graph
            .node_indices()
            .enumerate()
            .map(|(i, idx)| {
                let angle = -FRAC_PI_2 + TAU * i as f32 / count as f32;
                (idx, Point::new(radius * angle.cos(), radius * angle.sin()))
            })
            .collect();

        Ok(Layout::new(positions))
    }
}
