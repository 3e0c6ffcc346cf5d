//! SVG rendering of a positioned network.
//!
//! The drawing is assembled in three passes over the graph: edge geometry
//! (so parallel and reciprocal projections can be bent apart), content
//! bounds, and finally the SVG elements. Edges are drawn first so node
//! outlines sit on top of their endpoints.

mod markers;
mod paths;

use std::collections::HashMap;

use log::{debug, info};
use petgraph::graph::NodeIndex;
use svg::{Document, node::element as svg_element};

use neurograph_core::{
    apply_stroke,
    geometry::{Bounds, Point, Size},
    render::{EdgeRender, NodeRender},
};

use super::{Error, Exporter};
use crate::{context::RenderContext, layout::Layout, structure::NetworkGraph};
use paths::{BEND_STEP, EdgeGeometry, Endpoint};

const NODE_FONT_SIZE: f32 = 14.0;
const EDGE_FONT_SIZE: f32 = 11.0;
const ANNOTATION_FONT_SIZE: f32 = 14.0;
/// Height reserved above the network for the annotation.
const ANNOTATION_BAND: f32 = 28.0;
/// Approximate glyph width relative to the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;
const LABEL_GAP: f32 = 4.0;
const LABEL_PADDING: f32 = 3.0;
const FILL_OPACITY: f32 = 0.35;
const FONT_FAMILY: &str = "sans-serif";

/// Estimated extent of `text` set in `font_size`.
fn text_size(text: &str, font_size: f32) -> Size {
    Size::new(
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO,
        font_size * 1.2,
    )
}

/// An edge ready to be drawn.
struct RoutedEdge<'a> {
    edge: &'a EdgeRender,
    geometry: EdgeGeometry,
}

impl RoutedEdge<'_> {
    fn label_bounds(&self) -> Option<Bounds> {
        self.edge.label().map(|label| {
            let size = text_size(label, EDGE_FONT_SIZE);
            Bounds::centered(
                self.geometry.label_anchor,
                Size::new(
                    size.width() + 2.0 * LABEL_PADDING,
                    size.height() + 2.0 * LABEL_PADDING,
                ),
            )
        })
    }
}

impl Exporter for RenderContext {
    fn export_network(
        &mut self,
        graph: &NetworkGraph<'_>,
        layout: &Layout,
        annotation: Option<&str>,
    ) -> Result<(), Error> {
        let centers = node_centers(graph, layout)?;
        let edges = route_edges(graph, &centers);

        let mut content = content_bounds(graph, &centers, &edges);
        let annotation_origin = annotation.map(|text| {
            let origin = Point::new(content.min_x(), content.min_y() - ANNOTATION_BAND);
            let size = text_size(text, ANNOTATION_FONT_SIZE);
            content = content.merge(&Bounds::centered(
                Point::new(
                    origin.x() + size.width() / 2.0,
                    origin.y() + size.height() / 2.0,
                ),
                size,
            ));
            origin
        });

        let canvas = content.expand(self.margin());
        let size = canvas.size();
        debug!(
            width = size.width(),
            height = size.height(),
            edges = edges.len();
            "Drawing network"
        );

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()))
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = self.background() {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_string())
                    .set("fill-opacity", background.alpha()),
            );
        }

        doc = doc.add(markers::create_marker_definitions(
            edges.iter().map(|routed| routed.edge),
        ));

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!("translate({}, {})", -canvas.min_x(), -canvas.min_y()),
        );

        let mut edge_group = svg_element::Group::new().set("class", "edges");
        for routed in &edges {
            edge_group = edge_group.add(render_edge(routed));
        }
        main_group = main_group.add(edge_group);

        let mut label_group = svg_element::Group::new().set("class", "edge-labels");
        for routed in &edges {
            if let Some(label) = render_edge_label(routed) {
                label_group = label_group.add(label);
            }
        }
        main_group = main_group.add(label_group);

        let mut node_group = svg_element::Group::new().set("class", "nodes");
        for (idx, node) in graph.nodes() {
            if let Some(&center) = centers.get(&idx) {
                node_group = node_group.add(render_node(node, center));
            }
        }
        main_group = main_group.add(node_group);

        if let (Some(text), Some(origin)) = (annotation, annotation_origin) {
            main_group = main_group.add(
                svg_element::Text::new(text)
                    .set("class", "annotation")
                    .set("x", origin.x())
                    .set("y", origin.y() + ANNOTATION_FONT_SIZE)
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", ANNOTATION_FONT_SIZE)
                    .set("font-style", "italic"),
            );
        }

        self.set_document(doc.add(main_group));
        info!(nodes = graph.node_count(), edges = graph.edge_count(); "Network drawn");
        Ok(())
    }
}

fn node_centers(
    graph: &NetworkGraph<'_>,
    layout: &Layout,
) -> Result<HashMap<NodeIndex, Point>, Error> {
    graph
        .nodes()
        .map(|(idx, node)| {
            layout
                .position(idx)
                .map(|center| (idx, center))
                .ok_or_else(|| Error::Render(format!("node `{}` has no position", node.id())))
        })
        .collect()
}

/// Computes path geometry for every edge.
///
/// Edges between the same pair of nodes, in either direction, are spread
/// [`BEND_STEP`] apart around the straight line. Repeated self-loops nest.
fn route_edges<'a>(
    graph: &NetworkGraph<'a>,
    centers: &HashMap<NodeIndex, Point>,
) -> Vec<RoutedEdge<'a>> {
    let pair = |source: NodeIndex, target: NodeIndex| (source.min(target), source.max(target));

    let mut pair_sizes: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
    for (source, target, _) in graph.edges() {
        if source != target {
            *pair_sizes.entry(pair(source, target)).or_default() += 1;
        }
    }

    let endpoint = |idx: NodeIndex| -> Option<Endpoint> {
        let node = graph.node(idx)?;
        Some(Endpoint {
            center: *centers.get(&idx)?,
            radius: node.radius(),
            shape: node.shape(),
        })
    };

    let mut pair_seen: HashMap<(NodeIndex, NodeIndex), usize> = HashMap::new();
    let mut loops_seen: HashMap<NodeIndex, usize> = HashMap::new();

    graph
        .edges()
        .filter_map(|(source, target, edge)| {
            let from = endpoint(source)?;
            if source == target {
                let nth = loops_seen.entry(source).or_default();
                let geometry = paths::self_loop(from, *nth);
                *nth += 1;
                return Some(RoutedEdge { edge, geometry });
            }

            let to = endpoint(target)?;
            let key = pair(source, target);
            let total = pair_sizes.get(&key).copied().unwrap_or(1);
            let nth = pair_seen.entry(key).or_default();
            let offset = (*nth as f32 - (total as f32 - 1.0) / 2.0) * BEND_STEP;
            *nth += 1;

            // Offsets are measured against the lower-to-higher direction.
            let bend = if source < target { offset } else { -offset };
            Some(RoutedEdge {
                edge,
                geometry: paths::connect(from, to, bend),
            })
        })
        .collect()
}

fn content_bounds(
    graph: &NetworkGraph<'_>,
    centers: &HashMap<NodeIndex, Point>,
    edges: &[RoutedEdge<'_>],
) -> Bounds {
    let nodes = graph.nodes().filter_map(|(idx, node)| {
        let center = *centers.get(&idx)?;
        Some(Bounds::around(center, node.radius()).merge(&node_label_bounds(node, center)))
    });
    let edge_extents = edges.iter().map(|routed| {
        let anchor = Bounds::around(routed.geometry.label_anchor, routed.edge.stroke().width());
        routed
            .label_bounds()
            .map_or(anchor, |label| anchor.merge(&label))
    });

    nodes
        .chain(edge_extents)
        .reduce(|acc, bounds| acc.merge(&bounds))
        .unwrap_or_default()
}

fn node_label_center(node: &NodeRender, center: Point) -> Point {
    Point::new(
        center.x(),
        center.y() + node.radius() + LABEL_GAP + NODE_FONT_SIZE / 2.0,
    )
}

fn node_label_bounds(node: &NodeRender, center: Point) -> Bounds {
    Bounds::centered(
        node_label_center(node, center),
        text_size(node.label(), NODE_FONT_SIZE),
    )
}

fn render_node(node: &NodeRender, center: Point) -> svg_element::Group {
    let fill = node.fill();
    let outline: Box<dyn svg::Node> = match node.shape().polygon(center, node.radius()) {
        Some(vertices) => {
            let points = vertices
                .iter()
                .map(|vertex| format!("{},{}", vertex.x(), vertex.y()))
                .collect::<Vec<_>>()
                .join(" ");
            let polygon = svg_element::Polygon::new()
                .set("points", points)
                .set("fill", fill.to_string())
                .set("fill-opacity", FILL_OPACITY * fill.alpha());
            Box::new(apply_stroke!(polygon, node.stroke()))
        }
        None => {
            let circle = svg_element::Circle::new()
                .set("cx", center.x())
                .set("cy", center.y())
                .set("r", node.radius())
                .set("fill", fill.to_string())
                .set("fill-opacity", FILL_OPACITY * fill.alpha());
            Box::new(apply_stroke!(circle, node.stroke()))
        }
    };

    let label_center = node_label_center(node, center);
    let label = svg_element::Text::new(node.label())
        .set("x", label_center.x())
        .set("y", label_center.y())
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-family", FONT_FAMILY)
        .set("font-size", NODE_FONT_SIZE);

    svg_element::Group::new()
        .set("class", "node")
        .set("data-id", node.id())
        .add(outline)
        .add(label)
}

fn render_edge(routed: &RoutedEdge<'_>) -> svg_element::Path {
    let edge = routed.edge;
    let path = svg_element::Path::new()
        .set("d", routed.geometry.path.as_str())
        .set("fill", "none")
        .set("data-id", edge.id());
    let mut path = apply_stroke!(path, edge.stroke()).set(
        "marker-end",
        format!("url(#{})", markers::marker_id(edge.head(), edge)),
    );

    if let Some(tail) = edge.tail() {
        path = path.set(
            "marker-start",
            format!("url(#{})", markers::marker_id(tail, edge)),
        );
    }

    path
}

fn render_edge_label(routed: &RoutedEdge<'_>) -> Option<svg_element::Group> {
    let text = routed.edge.label()?;
    let bounds = routed.label_bounds()?;
    let anchor = routed.geometry.label_anchor;
    let size = bounds.size();

    Some(
        svg_element::Group::new()
            .set("class", "edge-label")
            .add(
                svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", 2)
                    .set("fill", "white")
                    .set("fill-opacity", 0.85),
            )
            .add(
                svg_element::Text::new(text)
                    .set("x", anchor.x())
                    .set("y", anchor.y())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", EDGE_FONT_SIZE),
            ),
    )
}

#[cfg(test)]
mod tests {
    use neurograph_model::from_str;

    use super::*;
    use crate::{
        config::GraphOptions,
        layout::{LayoutEngine, circular},
    };

    const SCENARIO: &str = r#"{
        "populations": {
            "E": {"size": 80, "component": "pyr"},
            "I": {"size": 20, "component": "bask"},
            "Solo": {"size": 5}
        },
        "projections": [
            {"id": "EI", "source": "E", "target": "I", "synapse": "ampa", "weight": 0.5},
            {"id": "IE", "source": "I", "target": "E", "synapse": "gaba", "delay": "2ms"},
            {"id": "II", "source": "I", "target": "I", "synapse": "gaba"}
        ],
        "inputs": {"drive": {"input_source": "poisson", "population": "E"}}
    }"#;

    fn draw(text: &str, options: &GraphOptions, annotation: Option<&str>) -> String {
        let spec = crate::build(&from_str(text).unwrap(), options).unwrap();
        let graph = NetworkGraph::from_spec(&spec).unwrap();
        let layout = circular::Engine::new().calculate(&graph).unwrap();

        let mut ctx = RenderContext::new();
        ctx.export_network(&graph, &layout, annotation).unwrap();
        ctx.to_svg_string().unwrap()
    }

    #[test]
    fn test_every_node_drawn() {
        let svg = draw(SCENARIO, &GraphOptions::default(), None);

        for id in ["E", "I", "Solo", "drive"] {
            assert!(svg.contains(&format!("data-id=\"{id}\"")), "missing {id}");
        }
        assert_eq!(svg.matches("class=\"node\"").count(), 4);
    }

    #[test]
    fn test_edges_reference_defined_markers() {
        let svg = draw(SCENARIO, &GraphOptions::default(), None);

        assert!(svg.contains("<marker"));
        assert_eq!(svg.matches("marker-end=\"url(#arrow-").count(), 4);
    }

    #[test]
    fn test_colors_written_as_hex() {
        let svg = draw(SCENARIO, &GraphOptions::default(), None);

        assert!(!svg.contains("rgb("));
        assert!(svg.contains("stroke=\"#0000ff\""));
        for id in svg.split("id=\"arrow-").skip(1) {
            let id = &id[..id.find('"').unwrap()];
            assert!(!id.contains('.'), "noisy marker id {id}");
        }
    }

    #[test]
    fn test_reciprocal_edges_are_curved() {
        let svg = draw(SCENARIO, &GraphOptions::default(), None);
        assert_eq!(svg.matches(" Q ").count(), 2);
        assert_eq!(svg.matches(" C ").count(), 1);
    }

    #[test]
    fn test_labels_only_with_show_info() {
        let plain = draw(SCENARIO, &GraphOptions::default(), None);
        assert!(!plain.contains("edge-label\""));

        let info = draw(SCENARIO, &GraphOptions::default().with_show_info(true), None);
        assert!(info.contains("class=\"edge-label\""));
        assert!(info.contains("Weight: 0.5"));
    }

    #[test]
    fn test_dashed_edges_have_dasharray() {
        let svg = draw(
            r#"{
                "populations": {"A": {}, "B": {}},
                "projections": [
                    {"source": "A", "target": "B", "random_connectivity": {"probability": 0.2}}
                ]
            }"#,
            &GraphOptions::default(),
            None,
        );
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_annotation_drawn() {
        let svg = draw(SCENARIO, &GraphOptions::default(), Some("Balanced network"));
        assert!(svg.contains("class=\"annotation\""));
        assert!(svg.contains("Balanced network"));
    }

    #[test]
    fn test_missing_position_is_render_error() {
        let spec = crate::build(&from_str(SCENARIO).unwrap(), &GraphOptions::default()).unwrap();
        let graph = NetworkGraph::from_spec(&spec).unwrap();

        let mut ctx = RenderContext::new();
        let result = ctx.export_network(&graph, &Layout::default(), None);

        assert!(matches!(result, Err(Error::Render(_))));
        assert!(!ctx.is_drawn());
    }

    #[test]
    fn test_empty_network_still_drawn() {
        let svg = draw(r#"{"populations": {}, "projections": []}"#, &GraphOptions::default(), None);
        assert!(svg.starts_with("<svg"));
    }
}
