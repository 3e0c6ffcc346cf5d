//! Hierarchical layout engine.
//!
//! Based on the Sugiyama algorithm for layered drawing of directed graphs,
//! using the rust-sugiyama implementation. Edges point downwards where the
//! graph allows it. Each weakly connected component is laid out on its own
//! and components are placed side by side. Nodes without edges to other
//! nodes go on a row below everything else.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::NodeIndex;
use rust_sugiyama::configure::Config;

use neurograph_core::geometry::Point;

use super::{Layout, LayoutEngine, max_radius};
use crate::{error::NeurographError, structure::NetworkGraph};

type Coordinates = Vec<(usize, (f64, f64))>;

/// Sugiyama layout engine.
pub struct Engine {
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Engine {
    /// Create a new hierarchical layout engine
    pub fn new() -> Self {
        Self {
            horizontal_spacing: 50.0,
            vertical_spacing: 80.0,
        }
    }

    /// Run rust-sugiyama, turning a panic into a layout error
    fn layer(edges: Vec<(u32, u32)>) -> Result<Vec<Coordinates>, NeurographError> {
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: 1.0,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        });

        match layouts {
            Ok(results) if !results.is_empty() => Ok(results
                .into_iter()
                .map(|(coords, _, _)| coords)
                .collect()),
            Ok(_) => Err(NeurographError::Layout(
                "rust-sugiyama returned empty layout results".to_string(),
            )),
            Err(err) => {
                let message = if let Some(panic_msg) = err.downcast_ref::<String>() {
                    format!("rust-sugiyama layout engine panicked: {panic_msg}")
                } else if let Some(panic_msg) = err.downcast_ref::<&str>() {
                    format!("rust-sugiyama layout engine panicked: {panic_msg}")
                } else {
                    "rust-sugiyama layout engine panicked with unknown error".to_string()
                };
                Err(NeurographError::Layout(message))
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
        let node_ids: HashMap<NodeIndex, u32> = graph
            .node_indices()
            .enumerate()
            .map(|(i, idx)| (idx, i as u32))
            .collect();
        let id_to_node: HashMap<u32, NodeIndex> =
            node_ids.iter().map(|(&idx, &id)| (id, idx)).collect();

        let edges: Vec<(u32, u32)> = graph
            .edges()
            .filter(|(source, target, _)| source != target)
            .filter_map(|(source, target, _)| Some((*node_ids.get(&source)?, *node_ids.get(&target)?)))
            .collect();

        let diameter = 2.0 * max_radius(graph);
        let step_x = self.horizontal_spacing + diameter;
        let step_y = self.vertical_spacing + diameter;

        let mut positions = HashMap::with_capacity(graph.node_count());
        let mut offset_x = 0.0_f32;
        let mut bottom = 0.0_f32;

        if !edges.is_empty() {
            debug!(
                nodes = node_ids.len(),
                edges = edges.len();
                "Applying Sugiyama algorithm"
            );

            for coords in Self::layer(edges.clone())? {
                let flip = runs_upwards(&coords, &edges);
                let min_x = coords.iter().map(|(_, (x, _))| *x).fold(f64::MAX, f64::min);
                let max_x = coords.iter().map(|(_, (x, _))| *x).fold(f64::MIN, f64::max);
                let min_y = coords
                    .iter()
                    .map(|(_, (_, y))| if flip { -*y } else { *y })
                    .fold(f64::MAX, f64::min);

                for &(id, (x, y)) in &coords {
                    let Some(&idx) = u32::try_from(id).ok().and_then(|id| id_to_node.get(&id))
                    else {
                        debug!(id; "Node id from rust-sugiyama result is out of range");
                        continue;
                    };
                    let y = if flip { -y } else { y };
                    let point = Point::new(
                        offset_x + (x - min_x) as f32 * step_x,
                        (y - min_y) as f32 * step_y,
                    );
                    bottom = bottom.max(point.y());
                    positions.insert(idx, point);
                }

                offset_x += ((max_x - min_x) as f32 + 1.0) * step_x;
            }

            if positions.is_empty() {
                return Err(NeurographError::Layout(
                    "failed to map any rust-sugiyama positions back to graph nodes".to_string(),
                ));
            }
            bottom += step_y;
        }

        let isolated = graph
            .node_indices()
            .filter(|idx| !positions.contains_key(idx))
            .collect::<Vec<_>>();
        for (i, idx) in isolated.into_iter().enumerate() {
            positions.insert(idx, Point::new(i as f32 * step_x, bottom));
        }

        Ok(Layout::new(positions))
    }
}

/// Whether the edges of a layered component mostly point towards smaller y.
fn runs_upwards(coords: &Coordinates, edges: &[(u32, u32)]) -> bool {
    let y_of: HashMap<usize, f64> = coords.iter().map(|&(id, (_, y))| (id, y)).collect();
    let drop: f64 = edges
        .iter()
        .filter_map(|&(source, target)| {
            Some(y_of.get(&(target as usize))? - y_of.get(&(source as usize))?)
        })
        .sum();
    drop < 0.0
}
