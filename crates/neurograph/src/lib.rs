//! Neurograph - graph diagrams of NeuroMLlite-style network models.
//!
//! A model document is loaded into a [`NetworkModel`], styled into a
//! [`RenderSpec`](render::RenderSpec) (node sizes, colors, shapes and edge
//! styles), laid out and drawn as SVG into a caller-owned [`RenderContext`].
//!
//! ```rust,no_run
//! use neurograph::{NetworkDiagram, RenderContext, config::AppConfig};
//!
//! let diagram = NetworkDiagram::from_path("network.json", AppConfig::default())
//!     .expect("Failed to load model");
//! let ctx = diagram
//!     .draw(RenderContext::new())
//!     .expect("Failed to draw network");
//! ctx.save("network.svg").expect("Failed to save");
//! ```

pub mod config;
pub mod layout;
pub mod structure;
pub mod style;

mod context;
mod error;
mod export;

pub use neurograph_core::{color, draw, geometry, render};
pub use neurograph_model::{self as model, NetworkModel};

pub use context::RenderContext;
pub use error::{ConfigError, NeurographError};
pub use style::{Styler, build};

use std::path::Path;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use render::RenderSpec;
use structure::NetworkGraph;

/// A loaded network model paired with the configuration used to draw it.
///
/// # Examples
///
/// ```rust
/// use neurograph::{NetworkDiagram, config::AppConfig, model};
///
/// let model = model::from_str(r#"{
///     "populations": {"A": {"size": 10}, "B": {"component": "inh", "size": 5}},
///     "projections": [{"source": "A", "target": "B", "weight": 1.0}]
/// }"#).unwrap();
///
/// let diagram = NetworkDiagram::from_model(model, AppConfig::default()).unwrap();
/// let svg = diagram.render_svg().unwrap();
/// assert!(svg.contains("data-id=\"A\""));
/// ```
#[derive(Debug, Clone)]
pub struct NetworkDiagram {
    model: NetworkModel,
    config: AppConfig,
}

impl NetworkDiagram {
    /// Loads the model at `path`.
    ///
    /// The configuration is validated before the file is read, so a bad
    /// option is reported even when the model is broken too.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Config`] for an invalid configuration,
    /// [`NeurographError::Parse`] if the file cannot be read or is not JSON,
    /// and [`NeurographError::Schema`] if the model is malformed.
    pub fn from_path(path: impl AsRef<Path>, config: AppConfig) -> Result<Self, NeurographError> {
        let path = path.as_ref();
        config.validate()?;

        info!(path:% = path.display(); "Loading network model");
        let model = neurograph_model::load(path)?;
        debug!(
            populations = model.populations().len(),
            projections = model.projections().len(),
            inputs = model.inputs().len();
            "Network model loaded"
        );

        Ok(Self { model, config })
    }

    /// Wraps an already loaded model.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Config`] for an invalid configuration.
    pub fn from_model(model: NetworkModel, config: AppConfig) -> Result<Self, NeurographError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &NetworkModel {
        &self.model
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Computes the visual attributes of every node and edge.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the graph options are invalid.
    pub fn render_spec(&self) -> Result<RenderSpec, ConfigError> {
        build(&self.model, self.config.graph())
    }

    /// Draws the network into `ctx` and hands the context back.
    ///
    /// Any drawing already held by `ctx` is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`NeurographError::Config`] for invalid options,
    /// [`NeurographError::Layout`] if node placement fails and
    /// [`NeurographError::Export`] if the SVG cannot be produced.
    pub fn draw(&self, mut ctx: RenderContext) -> Result<RenderContext, NeurographError> {
        let spec = self.render_spec()?;
        trace!(spec:?; "Render spec");

        let graph = NetworkGraph::from_spec(&spec)?;

        info!(layout:% = spec.layout(); "Calculating layout");
        let layout = layout::engine_for(spec.layout()).calculate(&graph)?;
        debug!(placed = layout.len(); "Layout calculated");

        ctx.export_network(&graph, &layout, spec.annotation())?;
        Ok(ctx)
    }

    /// Draws the network with the configured style and returns the SVG text.
    ///
    /// # Errors
    ///
    /// See [`NetworkDiagram::draw`]; an invalid style is a
    /// [`NeurographError::Config`].
    pub fn render_svg(&self) -> Result<String, NeurographError> {
        let ctx = RenderContext::from_style(self.config.style())?;
        let ctx = self.draw(ctx)?;
        ctx.to_svg_string().ok_or_else(|| {
            NeurographError::from(export::Error::Render(
                "drawing produced no document".to_string(),
            ))
        })
    }
}
