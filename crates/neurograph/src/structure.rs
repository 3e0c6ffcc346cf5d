//! Directed graph view of a [`RenderSpec`].
//!
//! Layout engines and exporters work on a [`NetworkGraph`], a petgraph
//! [`DiGraph`] whose node weights borrow the render spec's [`NodeRender`]s and whose
//! edge weights borrow its [`EdgeRender`]s. Population nodes come first in
//! render spec order, followed by input nodes; edges follow the same order.

use std::collections::HashMap;

use log::{debug, trace};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use neurograph_core::render::{EdgeRender, NodeRender, RenderSpec};

use crate::error::NeurographError;

/// The graph structure of one network diagram.
#[derive(Debug)]
pub struct NetworkGraph<'a> {
    graph: DiGraph<&'a NodeRender, &'a EdgeRender>,
    population_indices: HashMap<&'a str, NodeIndex>,
}

impl<'a> NetworkGraph<'a> {
    /// Builds the graph for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Graph`] if an edge names a population that
    /// has no node. Specs built from a loaded model never do.
    pub fn from_spec(spec: &'a RenderSpec) -> Result<Self, NeurographError> {
        let mut graph = DiGraph::with_capacity(
            spec.nodes().len() + spec.inputs().len(),
            spec.edges().len() + spec.inputs().len(),
        );

        let mut population_indices = HashMap::with_capacity(spec.nodes().len());
        for node in spec.nodes() {
            let idx = graph.add_node(node);
            population_indices.insert(node.id(), idx);
        }

        let lookup = |id: &str, edge: &EdgeRender| {
            population_indices.get(id).copied().ok_or_else(|| {
                NeurographError::Graph(format!(
                    "edge `{}` references unknown population `{id}`",
                    edge.id()
                ))
            })
        };

        let mut edges = Vec::with_capacity(spec.edges().len());
        for edge in spec.edges() {
            edges.push((lookup(edge.source(), edge)?, lookup(edge.target(), edge)?, edge));
        }

        let mut input_edges = Vec::with_capacity(spec.inputs().len());
        for input in spec.inputs() {
            let target = lookup(input.edge().target(), input.edge())?;
            input_edges.push((input, target));
        }

        for (source, target, edge) in edges {
            graph.add_edge(source, target, edge);
        }
        for (input, target) in input_edges {
            let source = graph.add_node(input.node());
            graph.add_edge(source, target, input.edge());
            trace!(input = input.node().id(); "Input node added");
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Network graph built"
        );

        Ok(Self {
            graph,
            population_indices,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node indices in insertion order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes with their indices, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &'a NodeRender)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (idx, self.graph[idx]))
    }

    /// Edges as `(source, target, edge)`, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &'a EdgeRender)> + '_ {
        self.graph.edge_indices().filter_map(|idx: EdgeIndex| {
            let (source, target) = self.graph.edge_endpoints(idx)?;
            Some((source, target, self.graph[idx]))
        })
    }

    pub fn node(&self, idx: NodeIndex) -> Option<&'a NodeRender> {
        self.graph.node_weight(idx).copied()
    }

    /// Index of the population node with the given id.
    pub fn population_index(&self, id: &str) -> Option<NodeIndex> {
        self.population_indices.get(id).copied()
    }
}

#[cfg(test)]
mod tests {
    use neurograph_core::{
        color::Color,
        draw::{ArrowHead, NodeShape, StrokeDefinition},
        render::{InputRender, LayoutKind},
    };

    use super::*;

    fn node(id: &str) -> NodeRender {
        NodeRender::new(
            id,
            id,
            10.0,
            Color::default(),
            StrokeDefinition::default(),
            NodeShape::Square,
        )
    }

    fn edge(id: &str, source: &str, target: &str) -> EdgeRender {
        EdgeRender::new(id, source, target, StrokeDefinition::default(), ArrowHead::Open)
    }

    fn spec(edges: Vec<EdgeRender>, inputs: Vec<InputRender>) -> RenderSpec {
        RenderSpec::new(
            vec![node("A"), node("B"), node("C")],
            edges,
            inputs,
            LayoutKind::default(),
            None,
        )
    }

    #[test]
    fn test_graph_counts_include_inputs() {
        let spec = spec(
            vec![edge("ab", "A", "B"), edge("ba", "B", "A")],
            vec![InputRender::new(node("stim"), edge("stim", "stim", "C"))],
        );
        let graph = NetworkGraph::from_spec(&spec).unwrap();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);

        let ids: Vec<&str> = graph.nodes().map(|(_, node)| node.id()).collect();
        assert_eq!(ids, ["A", "B", "C", "stim"]);
    }

    #[test]
    fn test_edges_keep_spec_order() {
        let spec = spec(
            vec![edge("ab", "A", "B"), edge("ba", "B", "A"), edge("cc", "C", "C")],
            Vec::new(),
        );
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        let a = graph.population_index("A").unwrap();
        let b = graph.population_index("B").unwrap();
        let c = graph.population_index("C").unwrap();

        let edges: Vec<_> = graph
            .edges()
            .map(|(source, target, edge)| (source, target, edge.id()))
            .collect();
        assert_eq!(edges, [(a, b, "ab"), (b, a, "ba"), (c, c, "cc")]);
        assert_eq!(graph.node(c).map(NodeRender::id), Some("C"));
        assert_eq!(graph.population_index("stim"), None);
    }

    #[test]
    fn test_unknown_endpoint_is_graph_error() {
        let spec = spec(vec![edge("ax", "A", "X")], Vec::new());
        assert!(matches!(
            NetworkGraph::from_spec(&spec),
            Err(NeurographError::Graph(_))
        ));
    }
}
