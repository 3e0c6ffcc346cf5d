//! Node outline shapes.

use std::f32::consts::{FRAC_PI_2, PI};

use serde::Serialize;

use crate::geometry::Point;

/// Outline drawn for a node.
///
/// Population shapes summarize the synapses a population projects with;
/// inputs always use [`NodeShape::Hexagon`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeShape {
    /// Generic or mixed populations
    #[default]
    Square,
    /// Populations projecting only through inhibitory synapses
    Circle,
    /// Populations projecting only through excitatory synapses
    Triangle,
    /// External inputs
    Hexagon,
}

impl NodeShape {
    /// Vertices of the outline inscribed in a square of half-width `radius`
    /// centered on `center`, or `None` for [`NodeShape::Circle`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use neurograph_core::{draw::NodeShape, geometry::Point};
    /// let triangle = NodeShape::Triangle.polygon(Point::new(0.0, 0.0), 10.0).unwrap();
    /// assert_eq!(triangle.len(), 3);
    /// assert!(NodeShape::Circle.polygon(Point::default(), 10.0).is_none());
    /// ```
    pub fn polygon(self, center: Point, radius: f32) -> Option<Vec<Point>> {
        let (x, y) = (center.x(), center.y());
        match self {
            Self::Circle => None,
            Self::Square => Some(vec![
                Point::new(x - radius, y - radius),
                Point::new(x + radius, y - radius),
                Point::new(x + radius, y + radius),
                Point::new(x - radius, y + radius),
            ]),
            Self::Triangle => Some(vec![
                Point::new(x, y - radius),
                Point::new(x + radius, y + radius),
                Point::new(x - radius, y + radius),
            ]),
            Self::Hexagon => Some(
                (0..6)
                    .map(|i| {
                        let angle = -FRAC_PI_2 + i as f32 * PI / 3.0;
                        Point::new(x + radius * angle.cos(), y + radius * angle.sin())
                    })
                    .collect(),
            ),
        }
    }
}
