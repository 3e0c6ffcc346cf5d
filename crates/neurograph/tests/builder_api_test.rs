//! Integration tests for the NetworkDiagram API
//!
//! These tests drive the public surface from model text to a saved SVG file.

use std::fs;

use neurograph::{
    ConfigError, NetworkDiagram, NeurographError, RenderContext, build,
    config::{self, AppConfig, ColorBy, GraphOptions, LayoutKind, StyleConfig},
    model,
};

const SCENARIO: &str = r#"{
    "populations": {"A": {"size": 10}, "B": {"component": "inh", "size": 5}},
    "projections": [{"source": "A", "target": "B", "weight": 1.0}]
}"#;

const NEUROML_LITE: &str = r#"{
    "Example2": {
        "version": "NeuroMLlite v0.5",
        "notes": "Two populations and a stimulus",
        "populations": {
            "pop0": {"size": 5, "component": "iaf", "properties": {"color": "1 0 0"}},
            "pop1": {"size": 10, "component": "iaf", "properties": {"color": "0 0 1"}}
        },
        "projections": {
            "proj0": {
                "presynaptic": "pop0",
                "postsynaptic": "pop1",
                "synapse": "ampa",
                "delay": "2ms",
                "random_connectivity": {"probability": 0.5}
            }
        },
        "input_sources": {"stim": {"pynn_input": "DCSource"}},
        "inputs": {"stim_pop0": {"input_source": "stim", "population": "pop0"}}
    }
}"#;

fn diagram(text: &str, graph: GraphOptions) -> NetworkDiagram {
    let config = AppConfig::new(graph, StyleConfig::default());
    NetworkDiagram::from_model(model::from_str(text).unwrap(), config).unwrap()
}

#[test]
fn test_scenario_spec() {
    let spec = diagram(SCENARIO, GraphOptions::default())
        .render_spec()
        .unwrap();

    let ids: Vec<&str> = spec.nodes().iter().map(|node| node.id()).collect();
    assert_eq!(ids, ["A", "B"]);
    assert_eq!(spec.edges().len(), 1);
    assert_eq!(spec.edges()[0].source(), "A");
    assert_eq!(spec.edges()[0].target(), "B");
    assert_eq!(spec.edges()[0].label(), None);
}

#[test]
fn test_scenario_spec_with_info() {
    let spec = diagram(SCENARIO, GraphOptions::default().with_show_info(true))
        .render_spec()
        .unwrap();
    assert!(spec.edges()[0].label().unwrap().contains("1.0"));
}

#[test]
fn test_undefined_target_is_schema_error() {
    let err = model::from_str(
        r#"{"populations": {"A": {}}, "projections": [{"source": "A", "target": "C"}]}"#,
    )
    .unwrap_err();
    let err = NeurographError::from(err);

    assert!(matches!(err, NeurographError::Schema(_)));
    assert!(err.to_string().contains("\"C\"") || err.to_string().contains("`C`"));
}

#[test]
fn test_unknown_option_names() {
    assert!(matches!(
        "rainbow".parse::<ColorBy>(),
        Err(ConfigError::UnknownValue { .. })
    ));
    assert!(matches!(
        config::parse_layout("radial"),
        Err(ConfigError::UnknownValue { .. })
    ));
    assert_eq!(config::parse_layout("circular"), Ok(LayoutKind::Circular));
}

#[test]
fn test_neuroml_lite_document_renders_every_population() {
    for layout in [LayoutKind::Spring, LayoutKind::Circular, LayoutKind::Hierarchical] {
        let svg = diagram(
            NEUROML_LITE,
            GraphOptions::default()
                .with_show_info(true)
                .with_layout(layout),
        )
        .render_svg()
        .unwrap();

        for id in ["pop0", "pop1", "stim_pop0"] {
            assert!(svg.contains(id), "{layout}: missing {id}");
        }
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("Two populations and a stimulus"));
    }
}

#[test]
fn test_color_by_property_uses_population_color() {
    let spec = diagram(
        NEUROML_LITE,
        GraphOptions::default().with_color_by(ColorBy::Property),
    )
    .render_spec()
    .unwrap();

    assert_ne!(
        spec.node("pop0").unwrap().fill(),
        spec.node("pop1").unwrap().fill()
    );
}

#[test]
fn test_same_component_same_color() {
    let model = model::from_str(NEUROML_LITE).unwrap();
    let first = build(&model, &GraphOptions::default()).unwrap();
    let second = build(&model, &GraphOptions::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.node("pop0").unwrap().fill(),
        first.node("pop1").unwrap().fill()
    );
}

#[test]
fn test_draw_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.svg");

    let ctx = diagram(SCENARIO, GraphOptions::default())
        .draw(RenderContext::new().with_margin(10.0))
        .unwrap();
    ctx.save(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("<svg"));
    assert!(written.contains("</svg>"));
    assert_eq!(Some(written), ctx.to_svg_string());
}

#[test]
fn test_from_path_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = NetworkDiagram::from_path(dir.path().join("absent.json"), AppConfig::default());
    assert!(matches!(result, Err(NeurographError::Parse(_))));
}

#[test]
fn test_unsupported_file_format() {
    let style = StyleConfig::default().with_file_format("png");
    let config = AppConfig::new(GraphOptions::default(), style);
    let diagram = NetworkDiagram::from_model(model::from_str(SCENARIO).unwrap(), config);
    assert!(matches!(
        diagram,
        Err(NeurographError::Config(ConfigError::UnsupportedFormat { .. }))
    ));
}
