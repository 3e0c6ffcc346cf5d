//! Edge path geometry.

use std::f32::consts::PI;

use neurograph_core::{draw::NodeShape, geometry::Point};

/// Distance between parallel edges connecting the same two nodes.
pub const BEND_STEP: f32 = 30.0;

/// A node outline as seen by edge routing.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub center: Point,
    pub radius: f32,
    pub shape: NodeShape,
}

/// SVG path data for one edge and the point its label is centered on.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeGeometry {
    pub path: String,
    pub label_anchor: Point,
}

impl Endpoint {
    /// Point where a ray from the center in direction `dir` leaves the outline.
    ///
    /// `dir` must be a unit vector.
    fn boundary(self, dir: Point) -> Point {
        let distance = match self.shape {
            NodeShape::Square => {
                let largest = dir.x().abs().max(dir.y().abs());
                if largest > 0.0 {
                    self.radius / largest
                } else {
                    self.radius
                }
            }
            NodeShape::Circle | NodeShape::Triangle | NodeShape::Hexagon => self.radius,
        };
        self.center.add_point(dir.scale(distance))
    }
}

/// Route from `source` to `target`, bowed sideways by `bend`.
///
/// A `bend` of zero gives a straight line. Otherwise the path is a
/// quadratic curve whose midpoint lies `bend` to the left of the straight
/// line, seen from the source.
pub fn connect(source: Endpoint, target: Endpoint, bend: f32) -> EdgeGeometry {
    let delta = target.center.sub_point(source.center);
    let Some(dir) = delta.normalized() else {
        return EdgeGeometry {
            path: line(source.center, target.center),
            label_anchor: source.center,
        };
    };

    let normal = Point::new(dir.y(), -dir.x());
    let mid = source.center.midpoint(target.center);
    let control = mid.add_point(normal.scale(2.0 * bend));

    let start_dir = control
        .sub_point(source.center)
        .normalized()
        .unwrap_or(dir);
    let end_dir = control
        .sub_point(target.center)
        .normalized()
        .unwrap_or(dir.scale(-1.0));
    let start = source.boundary(start_dir);
    let end = target.boundary(end_dir);

    if bend == 0.0 {
        EdgeGeometry {
            path: line(start, end),
            label_anchor: start.midpoint(end),
        }
    } else {
        EdgeGeometry {
            path: format!(
                "M {} {} Q {} {} {} {}",
                start.x(),
                start.y(),
                control.x(),
                control.y(),
                end.x(),
                end.y()
            ),
            label_anchor: mid.add_point(normal.scale(bend)),
        }
    }
}

/// Loop above `node` for a projection onto itself; `nth` loops grow outwards.
pub fn self_loop(node: Endpoint, nth: usize) -> EdgeGeometry {
    let r = node.radius;
    let reach = r * (2.5 + nth as f32);
    let c = node.center;

    let start = c.add_point(Point::new((-2.0 * PI / 3.0).cos(), (-2.0 * PI / 3.0).sin()).scale(r));
    let end = c.add_point(Point::new((-PI / 3.0).cos(), (-PI / 3.0).sin()).scale(r));
    let ctrl1 = c.add_point(Point::new(-reach * 0.6, -reach));
    let ctrl2 = c.add_point(Point::new(reach * 0.6, -reach));

    EdgeGeometry {
        path: format!(
            "M {} {} C {} {}, {} {}, {} {}",
            start.x(),
            start.y(),
            ctrl1.x(),
            ctrl1.y(),
            ctrl2.x(),
            ctrl2.y(),
            end.x(),
            end.y()
        ),
        label_anchor: c.add_point(Point::new(0.0, -reach * 0.8)),
    }
}

fn line(start: Point, end: Point) -> String {
    format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y())
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    fn endpoint(x: f32, y: f32, shape: NodeShape) -> Endpoint {
        Endpoint {
            center: Point::new(x, y),
            radius: 10.0,
            shape,
        }
    }

    #[test]
    fn test_straight_edge_trimmed_to_outlines() {
        let geometry = connect(
            endpoint(0.0, 0.0, NodeShape::Circle),
            endpoint(100.0, 0.0, NodeShape::Circle),
            0.0,
        );
        assert_eq!(geometry.path, "M 10 0 L 90 0");
        assert_eq!(geometry.label_anchor, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_square_boundary_on_diagonal() {
        let square = endpoint(0.0, 0.0, NodeShape::Square);
        let dir = Point::new(1.0, 1.0).normalized().unwrap();
        let corner = square.boundary(dir);

        assert!(approx_eq!(f32, corner.x(), 10.0, epsilon = 1e-4));
        assert!(approx_eq!(f32, corner.y(), 10.0, epsilon = 1e-4));
    }

    #[test]
    fn test_opposite_edges_bend_apart() {
        let a = endpoint(0.0, 0.0, NodeShape::Circle);
        let b = endpoint(100.0, 0.0, NodeShape::Circle);

        let forward = connect(a, b, BEND_STEP / 2.0);
        let backward = connect(b, a, BEND_STEP / 2.0);

        assert!(forward.path.contains(" Q "));
        assert!(forward.label_anchor.y() * backward.label_anchor.y() < 0.0);
    }

    #[test]
    fn test_coincident_nodes_do_not_panic() {
        let a = endpoint(5.0, 5.0, NodeShape::Square);
        let geometry = connect(a, a, 0.0);
        assert_eq!(geometry.label_anchor, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_self_loop_sits_above_node() {
        let geometry = self_loop(endpoint(0.0, 0.0, NodeShape::Circle), 0);
        assert!(geometry.path.starts_with("M "));
        assert!(geometry.label_anchor.y() < -10.0);
    }
}
