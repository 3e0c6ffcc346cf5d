//! Turns a [`NetworkModel`] into a [`RenderSpec`].
//!
//! The [`Styler`] owns every visual decision: labels, node radius, node
//! color and shape, edge color, dash pattern and arrow heads. It is a pure
//! function of the model and the [`GraphOptions`]; all option checking
//! happens in [`Styler::new`], so [`Styler::build`] cannot fail.
//!
//! # Synapse categories
//!
//! Every projection falls into one [`SynapseCategory`], decided by the first
//! rule that applies:
//!
//! 1. an explicit `sign`;
//! 2. the synapse name (`gaba`/`inh` is inhibitory, `ampa`/`nmda`/`exc` is
//!    excitatory);
//! 3. a negative numeric weight, which is inhibitory;
//! 4. otherwise the projection is generic.

use std::collections::HashMap;

use log::{debug, trace};

use neurograph_core::{
    color::{Color, Palette},
    draw::{ArrowHead, NodeShape, StrokeDefinition},
    render::{EdgeRender, InputRender, NodeRender, RenderSpec},
};
use neurograph_model::{Direction, Input, NetworkModel, Population, Projection, Sign};

use crate::{
    config::{ColorBy, GraphOptions},
    error::ConfigError,
};

const EXCITATORY_COLOR: &str = "blue";
const INHIBITORY_COLOR: &str = "red";
const INPUT_COLOR: &str = "yellow";

const NODE_STROKE_WIDTH: f32 = 3.0;
const INPUT_RADIUS_FACTOR: f32 = 0.75;

/// Effect a projection's synapses have on their target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynapseCategory {
    Excitatory,
    Inhibitory,
    Generic,
}

impl SynapseCategory {
    /// Classifies a projection.
    pub fn of(projection: &Projection) -> Self {
        if let Some(sign) = projection.sign() {
            return match sign {
                Sign::Excitatory => Self::Excitatory,
                Sign::Inhibitory => Self::Inhibitory,
            };
        }

        if let Some(synapse) = projection.synapse() {
            let synapse = synapse.to_ascii_lowercase();
            if synapse.contains("gaba") || synapse.contains("inh") {
                return Self::Inhibitory;
            }
            if ["ampa", "nmda", "exc"]
                .iter()
                .any(|name| synapse.contains(name))
            {
                return Self::Excitatory;
            }
        }

        match projection.weight().and_then(|weight| weight.as_f64()) {
            Some(weight) if weight < 0.0 => Self::Inhibitory,
            _ => Self::Generic,
        }
    }

    /// Arrow head drawn at the target end.
    pub fn arrow_head(self) -> ArrowHead {
        match self {
            Self::Excitatory => ArrowHead::Filled,
            Self::Inhibitory => ArrowHead::Round,
            Self::Generic => ArrowHead::Open,
        }
    }
}

/// Radius of a population node.
///
/// `base + scale * 8 * ln(1 + size)`: strictly increasing in `size` for any
/// positive `scale`, and slow-growing so large populations stay readable.
///
/// ```
/// # use neurograph::style::node_radius;
/// assert_eq!(node_radius(1, 0.0, 20.0), 20.0);
/// assert!(node_radius(1000, 1.0, 20.0) > node_radius(10, 1.0, 20.0));
/// ```
pub fn node_radius(size: u64, scale: f32, base: f32) -> f32 {
    base + scale * 8.0 * (size as f32).ln_1p()
}

/// Label listing the metadata a projection carries, if any.
///
/// ```
/// # use neurograph::style::edge_label;
/// let model = neurograph_model::from_str(r#"{
///     "populations": {"A": {}},
///     "projections": [{"source": "A", "target": "A", "weight": 1.0, "delay": "2ms"}]
/// }"#).unwrap();
/// assert_eq!(
///     edge_label(&model.projections()[0]).as_deref(),
///     Some("Weight: 1.0, Delay: 2ms")
/// );
/// ```
pub fn edge_label(projection: &Projection) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(weight) = projection.weight() {
        parts.push(format!("Weight: {weight}"));
    }
    if let Some(delay) = projection.delay() {
        parts.push(format!("Delay: {delay}"));
    }
    if let Some(probability) = projection.probability() {
        parts.push(format!("Probability: {probability}"));
    }
    if let Some(connections) = projection.connections() {
        parts.push(format!("Connections: {connections}"));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Builds render specs from network models under fixed options.
#[derive(Debug, Clone)]
pub struct Styler {
    options: GraphOptions,
    palette: Palette,
    uniform_color: Color,
    excitatory_color: Color,
    inhibitory_color: Color,
    input_color: Color,
}

impl Styler {
    /// Validates `options` and prepares a styler.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for any out-of-range or unparsable option.
    pub fn new(options: &GraphOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        Ok(Self {
            options: options.clone(),
            palette: Palette::default(),
            uniform_color: options.uniform_color()?,
            excitatory_color: fixed_color(EXCITATORY_COLOR)?,
            inhibitory_color: fixed_color(INHIBITORY_COLOR)?,
            input_color: fixed_color(INPUT_COLOR)?,
        })
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Computes the render spec for `model`.
    ///
    /// The result has exactly one node per population, one edge per
    /// projection and one input entry per model input, each in model order.
    pub fn build(&self, model: &NetworkModel) -> RenderSpec {
        let component_colors = self
            .palette
            .assign(model.populations().values().map(Population::component));
        let categories: Vec<SynapseCategory> = model
            .projections()
            .iter()
            .map(SynapseCategory::of)
            .collect();
        let outgoing = outgoing_categories(model, &categories);

        let nodes: Vec<NodeRender> = model
            .populations()
            .values()
            .map(|population| {
                let fill = self.population_color(population, &component_colors);
                let shape = population_shape(population.id(), &outgoing);
                self.population_node(population, fill, shape)
            })
            .collect();

        let fills: HashMap<&str, Color> = nodes
            .iter()
            .map(|node| (node.id(), node.fill()))
            .collect();

        let edges: Vec<EdgeRender> = model
            .projections()
            .iter()
            .zip(&categories)
            .map(|(projection, &category)| {
                let source_fill = fills
                    .get(projection.source())
                    .copied()
                    .unwrap_or_default();
                self.projection_edge(projection, category, source_fill)
            })
            .collect();

        let inputs: Vec<InputRender> = model
            .inputs()
            .iter()
            .map(|input| self.input_render(input))
            .collect();

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            inputs = inputs.len(),
            layout:% = self.options.layout();
            "Render spec built"
        );

        RenderSpec::new(
            nodes,
            edges,
            inputs,
            self.options.layout(),
            self.annotation(model),
        )
    }

    fn population_color(
        &self,
        population: &Population,
        component_colors: &HashMap<String, Color>,
    ) -> Color {
        let by_component = || {
            component_colors
                .get(population.component())
                .copied()
                .unwrap_or_else(|| self.palette.color_for(population.component()))
        };

        match self.options.color_by() {
            ColorBy::ComponentType => by_component(),
            ColorBy::Uniform => self.uniform_color,
            ColorBy::Property => population.color().unwrap_or_else(by_component),
        }
    }

    fn population_node(&self, population: &Population, fill: Color, shape: NodeShape) -> NodeRender {
        let label = if self.options.show_info() {
            format!("{} ({})", population.id(), population.component())
        } else {
            population.id().to_string()
        };
        let radius = node_radius(
            population.size(),
            self.options.node_size_scale(),
            self.options.base_node_radius(),
        );

        trace!(population = population.id(), radius, shape:?; "Population styled");

        NodeRender::new(
            population.id(),
            label,
            radius,
            fill,
            StrokeDefinition::solid(fill, NODE_STROKE_WIDTH),
            shape,
        )
    }

    fn projection_edge(
        &self,
        projection: &Projection,
        category: SynapseCategory,
        source_fill: Color,
    ) -> EdgeRender {
        let color = match category {
            SynapseCategory::Excitatory => self.excitatory_color,
            SynapseCategory::Inhibitory => self.inhibitory_color,
            SynapseCategory::Generic => source_fill,
        };

        let probabilistic = projection
            .probability()
            .and_then(|probability| probability.as_f64())
            .is_some_and(|probability| probability < 1.0);
        let stroke = if probabilistic {
            StrokeDefinition::dashed(color, self.options.edge_width())
        } else {
            StrokeDefinition::solid(color, self.options.edge_width())
        };

        let head = category.arrow_head();
        let mut edge = EdgeRender::new(
            projection.id(),
            projection.source(),
            projection.target(),
            stroke,
            head,
        )
        .with_arrow_scale(self.options.arrow_scale());

        if projection.direction() == Direction::Bidirectional {
            edge = edge.with_tail(head);
        }
        if self.options.show_info() {
            edge = edge.with_label(edge_label(projection));
        }

        edge
    }

    fn input_render(&self, input: &Input) -> InputRender {
        let label = if self.options.show_info() {
            format!("{} ({})", input.id(), input.input_source())
        } else {
            input.id().to_string()
        };

        let node = NodeRender::new(
            input.id(),
            label,
            self.options.base_node_radius() * INPUT_RADIUS_FACTOR,
            self.input_color,
            StrokeDefinition::solid(self.input_color, NODE_STROKE_WIDTH),
            NodeShape::Hexagon,
        );
        let edge = EdgeRender::new(
            input.id(),
            input.id(),
            input.population(),
            StrokeDefinition::solid(self.input_color, self.options.edge_width()),
            ArrowHead::Open,
        )
        .with_arrow_scale(self.options.arrow_scale());

        InputRender::new(node, edge)
    }

    fn annotation(&self, model: &NetworkModel) -> Option<String> {
        if !self.options.show_info() {
            return None;
        }

        match (model.id(), model.notes()) {
            (Some(id), Some(notes)) => Some(format!("{id}: {notes}")),
            (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
            (None, None) => None,
        }
    }
}

/// Computes the render spec for `model` under `options`.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `options` are invalid. A loaded model never
/// causes an error.
pub fn build(model: &NetworkModel, options: &GraphOptions) -> Result<RenderSpec, ConfigError> {
    Ok(Styler::new(options)?.build(model))
}

fn fixed_color(name: &'static str) -> Result<Color, ConfigError> {
    Color::new(name).map_err(|reason| ConfigError::InvalidColor {
        option: "synapse color",
        reason,
    })
}

/// Synapse categories seen on a population's outgoing projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outgoing {
    Only(SynapseCategory),
    Mixed,
}

impl Outgoing {
    fn with(self, category: SynapseCategory) -> Self {
        match self {
            Self::Only(current) if current == category => self,
            _ => Self::Mixed,
        }
    }

    fn shape(self) -> NodeShape {
        match self {
            Self::Only(SynapseCategory::Excitatory) => NodeShape::Triangle,
            Self::Only(SynapseCategory::Inhibitory) => NodeShape::Circle,
            Self::Only(SynapseCategory::Generic) | Self::Mixed => NodeShape::Square,
        }
    }
}

/// Collects the outgoing synapse categories of every population in one pass.
///
/// Bidirectional projections count as outgoing for both endpoints.
fn outgoing_categories<'a>(
    model: &'a NetworkModel,
    categories: &[SynapseCategory],
) -> HashMap<&'a str, Outgoing> {
    let mut outgoing: HashMap<&'a str, Outgoing> = HashMap::new();

    for (projection, &category) in model.projections().iter().zip(categories) {
        let mut record = |id: &'a str| {
            outgoing
                .entry(id)
                .and_modify(|seen| *seen = seen.with(category))
                .or_insert(Outgoing::Only(category));
        };

        record(projection.source());
        if projection.direction() == Direction::Bidirectional {
            record(projection.target());
        }
    }

    outgoing
}

/// Shape summarizing the synapses a population projects with.
fn population_shape(id: &str, outgoing: &HashMap<&str, Outgoing>) -> NodeShape {
    outgoing
        .get(id)
        .map_or(NodeShape::Square, |seen| seen.shape())
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::structure::NetworkGraph;

    // ===================
    // Strategies
    // ===================

    /// A model document with `(component, size)` per population, projections
    /// as index pairs and inputs as target indices.
    #[derive(Debug, Clone)]
    struct Document {
        populations: Vec<(usize, u64)>,
        projections: Vec<(usize, usize)>,
        inputs: Vec<usize>,
    }

    impl Document {
        fn to_json(&self) -> String {
            let populations: Map<String, Value> = self
                .populations
                .iter()
                .enumerate()
                .map(|(i, (component, size))| {
                    (
                        format!("pop{i}"),
                        json!({"component": format!("type{component}"), "size": size}),
                    )
                })
                .collect();
            let projections: Vec<Value> = self
                .projections
                .iter()
                .map(|(source, target)| {
                    json!({"source": format!("pop{source}"), "target": format!("pop{target}")})
                })
                .collect();
            let inputs: Map<String, Value> = self
                .inputs
                .iter()
                .enumerate()
                .map(|(i, target)| {
                    (
                        format!("stim{i}"),
                        json!({"input_source": "poisson", "population": format!("pop{target}")}),
                    )
                })
                .collect();

            json!({"populations": populations, "projections": projections, "inputs": inputs})
                .to_string()
        }
    }

    fn document_strategy() -> impl Strategy<Value = Document> {
        (1usize..8).prop_flat_map(|n| {
            (
                prop::collection::vec((0usize..3, 1u64..5000), n),
                prop::collection::vec((0..n, 0..n), 0..16),
                prop::collection::vec(0..n, 0..4),
            )
                .prop_map(|(populations, projections, inputs)| Document {
                    populations,
                    projections,
                    inputs,
                })
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// One node per population and one edge per projection, in model order.
    fn check_cardinality_preserved(doc: &Document, show_info: bool) -> Result<(), TestCaseError> {
        let model = neurograph_model::from_str(&doc.to_json()).unwrap();
        let spec = build(&model, &GraphOptions::default().with_show_info(show_info)).unwrap();

        prop_assert_eq!(spec.nodes().len(), doc.populations.len());
        prop_assert_eq!(spec.edges().len(), doc.projections.len());
        prop_assert_eq!(spec.inputs().len(), doc.inputs.len());
        for (i, node) in spec.nodes().iter().enumerate() {
            prop_assert_eq!(node.id(), format!("pop{i}"));
        }

        let graph = NetworkGraph::from_spec(&spec).unwrap();
        prop_assert_eq!(graph.node_count(), doc.populations.len() + doc.inputs.len());
        prop_assert_eq!(graph.edge_count(), doc.projections.len() + doc.inputs.len());
        Ok(())
    }

    /// Building twice gives the same spec, and one component gives one color.
    fn check_build_is_deterministic(doc: &Document) -> Result<(), TestCaseError> {
        let model = neurograph_model::from_str(&doc.to_json()).unwrap();
        let first = build(&model, &GraphOptions::default()).unwrap();
        let second = build(&model, &GraphOptions::default()).unwrap();
        prop_assert_eq!(&first, &second);

        for (a, node_a) in model.populations().values().zip(first.nodes()) {
            for (b, node_b) in model.populations().values().zip(first.nodes()) {
                if a.component() == b.component() {
                    prop_assert_eq!(node_a.fill(), node_b.fill());
                }
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn cardinality_preserved(doc in document_strategy(), show_info in any::<bool>()) {
            check_cardinality_preserved(&doc, show_info)?;
        }

        #[test]
        fn build_is_deterministic(doc in document_strategy()) {
            check_build_is_deterministic(&doc)?;
        }
    }
}
