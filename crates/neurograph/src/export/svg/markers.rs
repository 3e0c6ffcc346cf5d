//! Arrow marker definitions.
//!
//! One `<marker>` is defined per distinct combination of head kind, color
//! and scale used in a drawing. Markers use `auto-start-reverse` orientation
//! so the same definition serves both the head and the tail of an edge.

use std::collections::BTreeMap;

use svg::node::element::{Circle, Definitions, Marker, Path};

use neurograph_core::{color::Color, draw::ArrowHead, render::EdgeRender};

/// Marker size in stroke widths at an arrow scale of 1.
const MARKER_SIZE: f32 = 4.0;

/// Id of the marker used for `head` on `edge`.
pub fn marker_id(head: ArrowHead, edge: &EdgeRender) -> String {
    format!(
        "arrow-{}-{}-{}",
        head.marker_name(),
        edge.stroke().color().to_id_safe_string(),
        (edge.arrow_scale() * 100.0).round() as u32
    )
}

/// Creates marker definitions for every head and tail of `edges`.
pub fn create_marker_definitions<'a>(edges: impl Iterator<Item = &'a EdgeRender>) -> Definitions {
    let mut markers = BTreeMap::new();
    for edge in edges {
        for head in std::iter::once(edge.head()).chain(edge.tail()) {
            markers
                .entry(marker_id(head, edge))
                .or_insert_with(|| (head, edge.stroke().color(), edge.arrow_scale()));
        }
    }

    markers
        .into_iter()
        .fold(Definitions::new(), |defs, (id, (head, color, scale))| {
            defs.add(create_marker(&id, head, color, scale))
        })
}

fn create_marker(id: &str, head: ArrowHead, color: Color, scale: f32) -> Marker {
    let size = MARKER_SIZE * scale;
    let marker = Marker::new()
        .set("id", id)
        .set("viewBox", "0 0 10 10")
        .set("refY", 5)
        .set("markerWidth", size)
        .set("markerHeight", size)
        .set("orient", "auto-start-reverse");

    match head {
        ArrowHead::Filled => marker.set("refX", 9).add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", color.to_string()),
        ),
        ArrowHead::Open => marker.set("refX", 9).add(
            Path::new()
                .set("d", "M 1 1 L 9 5 L 1 9")
                .set("fill", "none")
                .set("stroke", color.to_string())
                .set("stroke-width", 1.5),
        ),
        ArrowHead::Round => marker.set("refX", 5).add(
            Circle::new()
                .set("cx", 5)
                .set("cy", 5)
                .set("r", 4)
                .set("fill", color.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use neurograph_core::draw::StrokeDefinition;

    use super::*;

    fn edge(color: &str, head: ArrowHead) -> EdgeRender {
        EdgeRender::new(
            "e",
            "A",
            "B",
            StrokeDefinition::solid(Color::new(color).unwrap(), 2.0),
            head,
        )
    }

    #[test]
    fn test_markers_deduplicated() {
        let edges = [
            edge("red", ArrowHead::Round),
            edge("red", ArrowHead::Round),
            edge("blue", ArrowHead::Filled).with_tail(ArrowHead::Filled),
            edge("blue", ArrowHead::Open),
        ];
        let defs = create_marker_definitions(edges.iter()).to_string();

        assert_eq!(defs.matches("<marker").count(), 3);
        assert!(defs.contains(&marker_id(ArrowHead::Round, &edges[0])));
    }

    #[test]
    fn test_marker_id_depends_on_scale() {
        let small = edge("red", ArrowHead::Open);
        let large = edge("red", ArrowHead::Open).with_arrow_scale(2.0);
        assert_ne!(
            marker_id(ArrowHead::Open, &small),
            marker_id(ArrowHead::Open, &large)
        );
    }
}
