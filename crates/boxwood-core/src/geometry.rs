//! Geometric primitives for diagram layout and painting.
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle with named anchor points
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! The origin is the top-left corner of the canvas and Y grows downward,
//! matching both raster images and SVG.

/// A 2D point in canvas coordinates.
///
/// # Examples
///
/// ```
/// # use boxwood_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(30.0, 40.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 20.0);
/// assert_eq!(mid.y(), 30.0);
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

    /// Adds another point to this point, returning a new point.
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

    /// Returns the point reached by travelling `distance` from here at `angle` radians.
    ///
    /// # Examples
    ///
    /// ```
    /// # use boxwood_core::geometry::Point;
    /// let p = Point::new(0.0, 0.0).polar_offset(0.0, 5.0);
    /// assert_eq!(p, Point::new(5.0, 0.0));
    /// ```
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        Self {
            x: self.x + distance * angle.cos(),
            y: self.y + distance * angle.sin(),
        }
    }

    /// Angle in radians of the direction from this point towards `other`.
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// Width and height of a rectangular area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the given width and height
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width component of the size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height component of the size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a size large enough to hold both sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns true if both width and height are zero
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned rectangle described by its minimum and maximum corners.
///
/// # Examples
///
/// ```
/// # use boxwood_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 40.0));
///
/// assert_eq!(bounds.top_center(), Point::new(60.0, 20.0));
/// assert_eq!(bounds.bottom_center(), Point::new(60.0, 60.0));
/// assert_eq!(bounds.left_center(), Point::new(10.0, 40.0));
/// assert_eq!(bounds.right_center(), Point::new(110.0, 40.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Center of the top edge.
    pub fn top_center(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.min_y)
    }

    /// Center of the bottom edge.
    pub fn bottom_center(self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, self.max_y)
    }

    /// Center of the left edge.
    pub fn left_center(self) -> Point {
        Point::new(self.min_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Center of the right edge.
    pub fn right_center(self) -> Point {
        Point::new(self.max_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Returns a copy with the bottom edge moved to `max_y`.
    pub fn with_max_y(mut self, max_y: f32) -> Self {
        self.max_y = max_y;
        self
    }

    /// Returns true if the half-open horizontal spans `[min_x, max_x)` overlap.
    pub fn overlaps_horizontally(self, other: Bounds) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x
    }

    /// Returns true if `other` lies fully inside these bounds.
    pub fn contains_bounds(self, other: Bounds) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }
}
