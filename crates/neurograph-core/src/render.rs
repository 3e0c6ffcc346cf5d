//! Render instructions handed to a drawing backend.
//!
//! A [`RenderSpec`] is the complete, backend-independent description of one
//! network diagram: a [`NodeRender`] per population, an [`EdgeRender`] per
//! projection, an [`InputRender`] per external input, the [`LayoutKind`] the
//! backend should use and an optional annotation line.
//!
//! Specs are plain values. They are recomputed for every draw and never
//! mutated once built, so two equal inputs always yield equal specs.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    draw::{ArrowHead, NodeShape, StrokeDefinition},
};

/// Layout algorithm requested from the drawing backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Force-directed placement (default)
    #[default]
    Spring,
    /// Nodes evenly spaced on a circle
    Circular,
    /// Layered placement following edge direction
    Hierarchical,
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spring" => Ok(Self::Spring),
            "circular" => Ok(Self::Circular),
            "hierarchical" => Ok(Self::Hierarchical),
            _ => Err(format!(
                "unsupported layout `{s}`, valid values: spring, circular, hierarchical"
            )),
        }
    }
}

impl From<LayoutKind> for &'static str {
    fn from(val: LayoutKind) -> Self {
        match val {
            LayoutKind::Spring => "spring",
            LayoutKind::Circular => "circular",
            LayoutKind::Hierarchical => "hierarchical",
        }
    }
}

impl Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Visual attributes of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRender {
    id: String,
    label: String,
    radius: f32,
    fill: Color,
    stroke: StrokeDefinition,
    shape: NodeShape,
}

impl NodeRender {
    /// Create a node render instruction.
    ///
    /// * `id` - population or input id the node stands for
    /// * `label` - text drawn inside the node
    /// * `radius` - half-width of the node outline
    /// * `fill` - fill color
    /// * `stroke` - outline stroke
    /// * `shape` - outline shape
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        radius: f32,
        fill: Color,
        stroke: StrokeDefinition,
        shape: NodeShape,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            radius,
            fill,
            stroke,
            shape,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn shape(&self) -> NodeShape {
        self.shape
    }
}

/// Visual attributes of one directed edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRender {
    id: String,
    source: String,
    target: String,
    stroke: StrokeDefinition,
    head: ArrowHead,
    tail: Option<ArrowHead>,
    arrow_scale: f32,
    label: Option<String>,
}

impl EdgeRender {
    /// Create an edge from `source` to `target` with a head marker and no
    /// tail marker or label.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        stroke: StrokeDefinition,
        head: ArrowHead,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            stroke,
            head,
            tail: None,
            arrow_scale: 1.0,
            label: None,
        }
    }

    /// Adds a marker at the source end, for reciprocal connections.
    pub fn with_tail(mut self, tail: ArrowHead) -> Self {
        self.tail = Some(tail);
        self
    }

    /// Scales the head and tail markers relative to the stroke width.
    pub fn with_arrow_scale(mut self, scale: f32) -> Self {
        self.arrow_scale = scale;
        self
    }

    /// Sets the text drawn at the edge midpoint.
    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn head(&self) -> ArrowHead {
        self.head
    }

    pub fn tail(&self) -> Option<ArrowHead> {
        self.tail
    }

    pub fn arrow_scale(&self) -> f32 {
        self.arrow_scale
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// An external input: its own node plus the edge into its target population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRender {
    node: NodeRender,
    edge: EdgeRender,
}

impl InputRender {
    pub fn new(node: NodeRender, edge: EdgeRender) -> Self {
        Self { node, edge }
    }

    pub fn node(&self) -> &NodeRender {
        &self.node
    }

    pub fn edge(&self) -> &EdgeRender {
        &self.edge
    }
}

/// The complete render description of one network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    nodes: Vec<NodeRender>,
    edges: Vec<EdgeRender>,
    inputs: Vec<InputRender>,
    layout: LayoutKind,
    annotation: Option<String>,
}

impl RenderSpec {
    pub fn new(
        nodes: Vec<NodeRender>,
        edges: Vec<EdgeRender>,
        inputs: Vec<InputRender>,
        layout: LayoutKind,
        annotation: Option<String>,
    ) -> Self {
        Self {
            nodes,
            edges,
            inputs,
            layout,
            annotation,
        }
    }

    /// One node per population, in model order.
    pub fn nodes(&self) -> &[NodeRender] {
        &self.nodes
    }

    /// One edge per projection, in model order.
    pub fn edges(&self) -> &[EdgeRender] {
        &self.edges
    }

    /// One entry per external input, in model order.
    pub fn inputs(&self) -> &[InputRender] {
        &self.inputs
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Looks up a population node by id.
    pub fn node(&self, id: &str) -> Option<&NodeRender> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Population nodes followed by input nodes.
    pub fn all_nodes(&self) -> impl Iterator<Item = &NodeRender> {
        self.nodes
            .iter()
            .chain(self.inputs.iter().map(InputRender::node))
    }

    /// Projection edges followed by input edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &EdgeRender> {
        self.edges
            .iter()
            .chain(self.inputs.iter().map(InputRender::edge))
    }
}
