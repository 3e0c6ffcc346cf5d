//! Force-directed layout engine.
//!
//! Every pair of nodes repels, every edge pulls its endpoints together, and
//! velocities are damped each step. Initial positions are a jittered grid
//! drawn from a seeded generator, so the same graph always gets the same
//! layout.

use std::collections::HashMap;

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use neurograph_core::geometry::Point;

use super::{Layout, LayoutEngine, max_radius};
use crate::{error::NeurographError, structure::NetworkGraph};

/// Spring layout engine.
pub struct Engine {
    iterations: usize,
    spring_constant: f32,
    repulsion_constant: f32,
    damping_factor: f32,
    max_step: f32,
    min_distance: f32,
    max_extent: f32,
    seed: u64,
}

impl Engine {
    /// Create a new spring layout engine
    pub fn new() -> Self {
        Self {
            iterations: 200,
            spring_constant: 0.05,
            repulsion_constant: 1000.0,
            damping_factor: 0.85,
            max_step: 50.0,
            min_distance: 60.0,
            max_extent: 1200.0,
            seed: 0x6e65_7572_6f67,
        }
    }

    /// Jittered grid, one cell per node
    fn initialize_positions(&self, count: usize, cell_size: f32) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let grid_size = ((count as f32).sqrt().ceil() as usize).max(1);

        (0..count)
            .map(|i| {
                let row = i / grid_size;
                let col = i % grid_size;
                let base = Point::new(col as f32 * cell_size, row as f32 * cell_size);
                let jitter =
                    Point::new(rng.random_range(-20.0..20.0), rng.random_range(-20.0..20.0));
                base.add_point(jitter)
            })
            .collect()
    }

    fn run_simulation(&self, radii: &[f32], springs: &[(usize, usize)]) -> Vec<Point> {
        let largest_radius = radii.iter().copied().fold(0.0, f32::max);
        let cell_size = (largest_radius * 2.0 + self.min_distance) * 1.5;
        let mut positions = self.initialize_positions(radii.len(), cell_size);
        let mut velocities = vec![Point::default(); radii.len()];

        for _ in 0..self.iterations {
            let mut forces = vec![Point::default(); radii.len()];

            for i in 0..positions.len() {
                for j in 0..positions.len() {
                    if i == j {
                        continue;
                    }

                    let trans = positions[i].sub_point(positions[j]);
                    let min_dist = radii[i] + radii[j] + self.min_distance;
                    let distance = trans.hypot().max(1.0);

                    // Stronger repulsion when nodes are too close
                    let force_factor = if distance < min_dist {
                        self.repulsion_constant * (min_dist / distance).powf(2.0)
                    } else {
                        self.repulsion_constant / distance
                    };

                    forces[i] = forces[i].add_point(trans.scale(force_factor / distance));
                }
            }

            for &(source, target) in springs {
                let dist = positions[source].sub_point(positions[target]);
                let force = dist.scale(self.spring_constant);

                forces[source] = forces[source].sub_point(force);
                forces[target] = forces[target].add_point(force);
            }

            for (i, force) in forces.into_iter().enumerate() {
                let mut velocity = velocities[i].add_point(force).scale(self.damping_factor);
                let speed = velocity.hypot();
                if speed > self.max_step {
                    velocity = velocity.scale(self.max_step / speed);
                }
                velocities[i] = velocity;
                positions[i] = positions[i].add_point(velocity);
            }
        }

        self.center_layout(&mut positions, radii);
        positions
    }

    /// Smallest uniform scale at which no two nodes overlap.
    fn separation_scale(&self, positions: &[Point], radii: &[f32]) -> f32 {
        let mut scale: f32 = 0.0;
        for i in 0..positions.len() {
            for j in i + 1..positions.len() {
                let distance = positions[i].sub_point(positions[j]).hypot().max(1.0);
                let needed = radii[i] + radii[j] + self.min_distance / 2.0;
                scale = scale.max(needed / distance);
            }
        }
        scale
    }

    /// Center the layout around the origin and shrink it into `max_extent`.
    ///
    /// The shrink never goes below the scale that keeps nodes apart, and a
    /// layout whose nodes still overlap is spread out instead.
    fn center_layout(&self, positions: &mut [Point], radii: &[f32]) {
        if positions.is_empty() {
            return;
        }

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for pos in positions.iter() {
            min_x = min_x.min(pos.x());
            min_y = min_y.min(pos.y());
            max_x = max_x.max(pos.x());
            max_y = max_y.max(pos.y());
        }

        let center = Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        for pos in positions.iter_mut() {
            *pos = pos.sub_point(center);
        }

        let largest = (max_x - min_x).max(max_y - min_y);
        let shrink = if largest > self.max_extent {
            self.max_extent / largest
        } else {
            1.0
        };
        let scale_factor = shrink.max(self.separation_scale(positions, radii));
        if scale_factor != 1.0 {
            debug!(scale_factor = scale_factor; "Rescaling spring layout");
            for pos in positions.iter_mut() {
                *pos = pos.scale(scale_factor);
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine for Engine {
    fn calculate(&self, graph: &NetworkGraph<'_>) -> Result<Layout, NeurographError> {
        let indices: Vec<_> = graph.node_indices().collect();
        let slots: HashMap<_, _> = indices
            .iter()
            .enumerate()
            .map(|(slot, &idx)| (idx, slot))
            .collect();

        let radii: Vec<f32> = graph.nodes().map(|(_, node)| node.radius()).collect();
        let springs: Vec<(usize, usize)> = graph
            .edges()
            .filter(|(source, target, _)| source != target)
            .filter_map(|(source, target, _)| Some((*slots.get(&source)?, *slots.get(&target)?)))
            .collect();

        debug!(
            nodes = indices.len(),
            springs = springs.len(),
            iterations = self.iterations,
            max_radius = max_radius(graph);
            "Running spring layout"
        );

        let positions = self.run_simulation(&radii, &springs);
        if positions.iter().any(|pos| !pos.x().is_finite() || !pos.y().is_finite()) {
            return Err(NeurographError::Layout(
                "spring simulation diverged".to_string(),
            ));
        }

        Ok(Layout::new(indices.into_iter().zip(positions).collect()))
    }
}

#[cfg(test)]
mod tests {
    use neurograph_model::from_str;

    use super::*;
    use crate::config::GraphOptions;

    fn spec(text: &str) -> neurograph_core::render::RenderSpec {
        crate::build(&from_str(text).unwrap(), &GraphOptions::default()).unwrap()
    }

    const RING: &str = r#"{
        "populations": {"A": {"size": 100}, "B": {}, "C": {"size": 20}, "D": {}},
        "projections": [
            {"source": "A", "target": "B"},
            {"source": "B", "target": "C"},
            {"source": "C", "target": "D"},
            {"source": "D", "target": "A"},
            {"source": "A", "target": "A"}
        ],
        "inputs": {"stim": {"input_source": "s", "population": "A"}}
    }"#;

    #[test]
    fn test_every_node_placed() {
        let spec = spec(RING);
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        let layout = Engine::new().calculate(&graph).unwrap();

        assert_eq!(layout.len(), graph.node_count());
        for idx in graph.node_indices() {
            let pos = layout.position(idx).unwrap();
            assert!(pos.x().is_finite() && pos.y().is_finite());
        }
    }

    #[test]
    fn test_layout_is_reproducible() {
        let spec = spec(RING);
        let graph = NetworkGraph::from_spec(&spec).unwrap();

        let first = Engine::new().calculate(&graph).unwrap();
        let second = Engine::new().calculate(&graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_nodes_do_not_coincide() {
        let spec = spec(RING);
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        let layout = Engine::new().calculate(&graph).unwrap();

        let points: Vec<Point> = graph
            .node_indices()
            .filter_map(|idx| layout.position(idx))
            .collect();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.sub_point(*b).hypot() > 1.0);
            }
        }
    }

    #[test]
    fn test_large_network_nodes_do_not_overlap() {
        let populations: Vec<String> = (0..60)
            .map(|i| format!(r#""P{i}": {{"size": 1000}}"#))
            .collect();
        let projections: Vec<String> = (0..60)
            .map(|i| format!(r#"{{"source": "P{i}", "target": "P{}"}}"#, (i + 1) % 60))
            .collect();
        let text = format!(
            r#"{{"populations": {{{}}}, "projections": [{}]}}"#,
            populations.join(", "),
            projections.join(", ")
        );
        let spec = spec(&text);
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        let layout = Engine::new().calculate(&graph).unwrap();

        let placed: Vec<(Point, f32)> = graph
            .nodes()
            .filter_map(|(idx, node)| Some((layout.position(idx)?, node.radius())))
            .collect();
        assert_eq!(placed.len(), 60);
        for (i, (a, ra)) in placed.iter().enumerate() {
            for (b, rb) in &placed[i + 1..] {
                assert!(a.sub_point(*b).hypot() >= ra + rb, "nodes overlap");
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let spec = spec(r#"{"populations": {}, "projections": []}"#);
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        assert!(Engine::new().calculate(&graph).unwrap().is_empty());
    }
}
