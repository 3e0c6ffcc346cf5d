//! Configuration types for neurograph rendering.
//!
//! This module provides configuration structures that control how a network
//! model is turned into a diagram. All types implement [`serde::Deserialize`]
//! so they can be loaded from external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining graph and style settings.
//! - [`GraphOptions`] - Controls labels, node sizes, colors and the layout algorithm.
//! - [`StyleConfig`] - Controls canvas options such as background color and margin.
//!
//! Option values are checked by [`AppConfig::validate`] and
//! [`GraphOptions::validate`], which report the first offending option as a
//! [`ConfigError`].
//!
//! # Example
//!
//! ```
//! # use neurograph::config::{AppConfig, ColorBy, GraphOptions};
//! let options = GraphOptions::default()
//!     .with_show_info(true)
//!     .with_color_by("uniform".parse().unwrap());
//! assert_eq!(options.color_by(), ColorBy::Uniform);
//!
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};

use neurograph_core::color::Color;

pub use neurograph_core::render::LayoutKind;

use crate::error::ConfigError;

/// How population nodes are colored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ColorBy {
    /// One palette color per component type (default)
    #[default]
    ComponentType,
    /// Every population gets [`GraphOptions::uniform_color`]
    Uniform,
    /// The population's own `properties.color`, else its component-type color
    Property,
}

impl FromStr for ColorBy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "component-type" | "component_type" | "component" => Ok(Self::ComponentType),
            "uniform" => Ok(Self::Uniform),
            "property" => Ok(Self::Property),
            _ => Err(ConfigError::UnknownValue {
                option: "color_by",
                value: s.to_string(),
                expected: "component-type, uniform, property",
            }),
        }
    }
}

impl TryFrom<String> for ColorBy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ColorBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ComponentType => "component-type",
            Self::Uniform => "uniform",
            Self::Property => "property",
        })
    }
}

/// Parses a layout name, reporting unknown names as a [`ConfigError`].
///
/// ```
/// # use neurograph::config::{parse_layout, LayoutKind};
/// assert_eq!(parse_layout("circular").unwrap(), LayoutKind::Circular);
/// assert!(parse_layout("grid").is_err());
/// ```
pub fn parse_layout(name: &str) -> Result<LayoutKind, ConfigError> {
    name.parse().map_err(|_| ConfigError::UnknownValue {
        option: "layout",
        value: name.to_string(),
        expected: "spring, circular, hierarchical",
    })
}

fn deserialize_layout<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LayoutKind, D::Error> {
    let name = String::deserialize(deserializer)?;
    parse_layout(&name).map_err(serde::de::Error::custom)
}

/// Image format written by the exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("svg") {
            Ok(Self::Svg)
        } else {
            Err(ConfigError::UnsupportedFormat {
                format: s.to_string(),
            })
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Top-level application configuration combining graph and style settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Graph construction section.
    #[serde(default)]
    graph: GraphOptions,

    /// Canvas style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(graph: GraphOptions, style: StyleConfig) -> Self {
        Self { graph, style }
    }

    /// Returns the graph options.
    pub fn graph(&self) -> &GraphOptions {
        &self.graph
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks every option of both sections.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.graph.validate()?;
        self.style.validate()
    }
}

/// Options controlling how a model becomes a render spec.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    show_info: bool,
    node_size_scale: f32,
    base_node_radius: f32,
    color_by: ColorBy,
    uniform_color: String,
    #[serde(deserialize_with = "deserialize_layout")]
    layout: LayoutKind,
    edge_width: f32,
    arrow_scale: f32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            show_info: false,
            node_size_scale: 1.0,
            base_node_radius: 20.0,
            color_by: ColorBy::default(),
            uniform_color: "#4c72b0".to_string(),
            layout: LayoutKind::default(),
            edge_width: 2.0,
            arrow_scale: 1.0,
        }
    }
}

impl GraphOptions {
    pub fn with_show_info(mut self, show_info: bool) -> Self {
        self.show_info = show_info;
        self
    }

    pub fn with_node_size_scale(mut self, scale: f32) -> Self {
        self.node_size_scale = scale;
        self
    }

    pub fn with_base_node_radius(mut self, radius: f32) -> Self {
        self.base_node_radius = radius;
        self
    }

    pub fn with_color_by(mut self, color_by: ColorBy) -> Self {
        self.color_by = color_by;
        self
    }

    pub fn with_uniform_color(mut self, color: impl Into<String>) -> Self {
        self.uniform_color = color.into();
        self
    }

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_edge_width(mut self, width: f32) -> Self {
        self.edge_width = width;
        self
    }

    pub fn with_arrow_scale(mut self, scale: f32) -> Self {
        self.arrow_scale = scale;
        self
    }

    /// Whether nodes and edges carry metadata labels.
    pub fn show_info(&self) -> bool {
        self.show_info
    }

    /// Multiplier applied to the logarithmic size term of the node radius.
    pub fn node_size_scale(&self) -> f32 {
        self.node_size_scale
    }

    /// Radius of a node before the size term is added.
    pub fn base_node_radius(&self) -> f32 {
        self.base_node_radius
    }

    pub fn color_by(&self) -> ColorBy {
        self.color_by
    }

    /// The parsed color used by [`ColorBy::Uniform`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the string is not a CSS color.
    pub fn uniform_color(&self) -> Result<Color, ConfigError> {
        Color::new(&self.uniform_color).map_err(|reason| ConfigError::InvalidColor {
            option: "uniform_color",
            reason,
        })
    }

    pub fn layout(&self) -> LayoutKind {
        self.layout
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub fn arrow_scale(&self) -> f32 {
        self.arrow_scale
    }

    /// Checks ranges and colors.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("node_size_scale", self.node_size_scale)?;
        check_positive("base_node_radius", self.base_node_radius)?;
        check_positive("edge_width", self.edge_width)?;
        check_positive("arrow_scale", self.arrow_scale)?;
        self.uniform_color()?;
        Ok(())
    }
}

/// Canvas styling for rendered diagrams.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    margin: f32,
    file_format: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            margin: 40.0,
            file_format: OutputFormat::default().to_string(),
        }
    }
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_file_format(mut self, format: impl Into<String>) -> Self {
        self.file_format = format.into();
        self
    }

    /// Returns the parsed background [`Color`], or `None` for a transparent canvas.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the configured string cannot
    /// be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, ConfigError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|reason| ConfigError::InvalidColor {
                option: "background_color",
                reason,
            })
    }

    /// Space left around the drawing.
    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// The parsed output format.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for anything but `svg`.
    pub fn file_format(&self) -> Result<OutputFormat, ConfigError> {
        self.file_format.parse()
    }

    /// Checks the margin, background color and output format.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("margin", self.margin)?;
        self.background_color()?;
        self.file_format()?;
        Ok(())
    }
}

fn check_non_negative(option: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            option,
            value,
            requirement: "a finite number >= 0",
        })
    }
}

fn check_positive(option: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            option,
            value,
            requirement: "a finite number > 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.graph().show_info());
        assert_eq!(config.graph().node_size_scale(), 1.0);
        assert_eq!(config.graph().layout(), LayoutKind::Spring);
        assert_eq!(config.style().file_format().unwrap(), OutputFormat::Svg);
        assert_eq!(config.style().background_color().unwrap(), None);
    }

    #[test]
    fn test_color_by_names() {
        assert_eq!(
            "component-type".parse::<ColorBy>().unwrap(),
            ColorBy::ComponentType
        );
        assert_eq!("property".parse::<ColorBy>().unwrap(), ColorBy::Property);

        let err = "rainbow".parse::<ColorBy>().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownValue {
                option: "color_by",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_layout_is_config_error() {
        assert!(matches!(
            parse_layout("grid"),
            Err(ConfigError::UnknownValue {
                option: "layout",
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_range_values() {
        let negative = GraphOptions::default().with_node_size_scale(-1.0);
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::OutOfRange {
                option: "node_size_scale",
                ..
            })
        ));

        let nan = GraphOptions::default().with_node_size_scale(f32::NAN);
        assert!(nan.validate().is_err());

        let zero_width = GraphOptions::default().with_edge_width(0.0);
        assert!(matches!(
            zero_width.validate(),
            Err(ConfigError::OutOfRange {
                option: "edge_width",
                ..
            })
        ));

        assert!(
            GraphOptions::default()
                .with_node_size_scale(0.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_invalid_colors() {
        let graph = GraphOptions::default().with_uniform_color("not-a-color");
        assert!(matches!(
            graph.validate(),
            Err(ConfigError::InvalidColor {
                option: "uniform_color",
                ..
            })
        ));

        let style = StyleConfig::default().with_background_color("nope nope");
        assert!(style.validate().is_err());
    }

    #[test]
    fn test_unsupported_file_format() {
        let style = StyleConfig::default().with_file_format("png");
        assert_eq!(
            style.validate(),
            Err(ConfigError::UnsupportedFormat {
                format: "png".to_string()
            })
        );
        assert!(StyleConfig::default().with_file_format("SVG").validate().is_ok());
    }
}
