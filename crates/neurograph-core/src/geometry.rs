//! Geometric primitives for diagram layout and positioning.
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Coordinates follow SVG: origin at the top-left, X grows rightward and Y
//! grows downward.

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use neurograph_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns the unit vector pointing the same way, or `None` for the zero vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use neurograph_core::geometry::Point;
    /// let unit = Point::new(3.0, 4.0).normalized().unwrap();
    /// assert!((unit.x() - 0.6).abs() < 1e-6);
    /// assert!(Point::default().normalized().is_none());
    /// ```
    pub fn normalized(self) -> Option<Self> {
        let length = self.hypot();
        if length <= f32::EPSILON {
            return None;
        }
        Some(self.scale(1.0 / length))
    }
}

/// Width and height of a rectangular area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Bounds of a square of half-width `radius` centered on `center`.
    pub fn around(center: Point, radius: f32) -> Self {
        Self {
            min_x: center.x() - radius,
            min_y: center.y() - radius,
            max_x: center.x() + radius,
            max_y: center.y() + radius,
        }
    }

    /// Bounds of a `size` rectangle centered on `center`.
    pub fn centered(center: Point, size: Size) -> Self {
        let (half_width, half_height) = (size.width() / 2.0, size.height() / 2.0);
        Self {
            min_x: center.x() - half_width,
            min_y: center.y() - half_height,
            max_x: center.x() + half_width,
            max_y: center.y() + half_height,
        }
    }

    /// Returns the minimum x-coordinate
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width and height of the bounds
    pub fn size(self) -> Size {
        Size::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }

    /// Smallest bounds containing both `self` and `other`
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `margin` on every side
    pub fn expand(self, margin: f32) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);

        assert_eq!(b.sub_point(a), Point::new(3.0, 4.0));
        assert!(approx_eq!(f32, b.sub_point(a).hypot(), 5.0));
        assert_eq!(a.scale(2.0), Point::new(2.0, 4.0));
    }

    #[test]
    fn test_bounds_merge_and_expand() {
        let a = Bounds::around(Point::new(0.0, 0.0), 10.0);
        let b = Bounds::around(Point::new(100.0, 50.0), 5.0);
        let merged = a.merge(&b).expand(2.0);

        assert!(approx_eq!(f32, merged.min_x(), -12.0));
        assert!(approx_eq!(f32, merged.min_y(), -12.0));
        assert!(approx_eq!(f32, merged.max_x(), 107.0));
        assert!(approx_eq!(f32, merged.max_y(), 57.0));
        assert!(approx_eq!(f32, merged.size().width(), 119.0));
    }

    #[test]
    fn test_bounds_centered() {
        let bounds = Bounds::centered(Point::new(10.0, 10.0), Size::new(8.0, 4.0));

        assert!(approx_eq!(f32, bounds.min_x(), 6.0));
        assert!(approx_eq!(f32, bounds.max_y(), 12.0));
        assert!(approx_eq!(f32, bounds.size().height(), 4.0));
    }
}
