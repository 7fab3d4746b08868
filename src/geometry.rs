//! Planar primitives used to place walls and doors on the grid.
//!
//! Everything here is axis-aligned: segments are horizontal or vertical and
//! rectangles have sides parallel to the axes. Comparisons are exact, which
//! is sound because every coordinate the labyrinth produces is an integer or
//! an integer plus one half.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A position on the plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// |dx| + |dy|, the search heuristic
    pub fn manhattan_distance(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Order two points by their distance from the origin.
    ///
    /// Not used as `PartialOrd` because distinct points can share a distance.
    pub fn cmp_by_origin_distance(&self, other: &Point) -> Ordering {
        self.distance(&Point::ORIGIN)
            .total_cmp(&other.distance(&Point::ORIGIN))
    }

    /// True when both coordinates are whole numbers
    pub fn is_integral(&self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Axis a segment runs parallel to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal
    X,
    /// Vertical
    Y,
}

/// Finite, axis-aligned line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
    length: f64,
    axis: Axis,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Result<Self, GeometryError> {
        if start == end {
            return Err(GeometryError::Degenerate(start));
        }
        let axis = if start.y == end.y {
            Axis::X
        } else if start.x == end.x {
            Axis::Y
        } else {
            return Err(GeometryError::NotAxisAligned { start, end });
        };

        Ok(Segment {
            start,
            end,
            length: start.distance(&end),
            axis,
        })
    }

    /// Unit segment running from `start` in the positive direction of `axis`
    pub(crate) fn unit_along(start: Point, axis: Axis) -> Self {
        let end = match axis {
            Axis::X => Point::new(start.x + 1.0, start.y),
            Axis::Y => Point::new(start.x, start.y + 1.0),
        };
        Segment {
            start,
            end,
            length: 1.0,
            axis,
        }
    }

    /// Same segment with endpoints in increasing-coordinate order
    pub fn normalized(&self) -> Self {
        let reversed = match self.axis {
            Axis::X => self.start.x > self.end.x,
            Axis::Y => self.start.y > self.end.y,
        };
        if reversed {
            Segment {
                start: self.end,
                end: self.start,
                ..*self
            }
        } else {
            *self
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_horizontal(&self) -> bool {
        self.axis == Axis::X
    }

    pub fn is_vertical(&self) -> bool {
        self.axis == Axis::Y
    }

    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// (x2-x1)(y3-y1) - (y2-y1)(x3-x1) == 0
    pub fn is_colinear(&self, point: &Point) -> bool {
        let cross = (self.end.x - self.start.x) * (point.y - self.start.y)
            - (self.end.y - self.start.y) * (point.x - self.start.x);
        cross == 0.0
    }

    /// Colinear and no farther than `length` from either endpoint
    pub fn contains_point(&self, point: &Point) -> bool {
        self.is_colinear(point)
            && point.distance(&self.start) <= self.length
            && point.distance(&self.end) <= self.length
    }

    pub fn contains_segment(&self, other: &Segment) -> bool {
        self.contains_point(&other.start) && self.contains_point(&other.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Axis-aligned rectangle with precomputed sides and center
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    bottom_left: Point,
    upper_left: Point,
    bottom_right: Point,
    upper_right: Point,
    center: Point,
    width: f64,
    height: f64,
    bottom: Segment,
    top: Segment,
    left: Segment,
    right: Segment,
}

impl Rectangle {
    /// Build from the four corners
    pub fn from_corners(
        bottom_left: Point,
        upper_left: Point,
        bottom_right: Point,
        upper_right: Point,
    ) -> Result<Self, GeometryError> {
        let aligned = bottom_left.y == bottom_right.y
            && upper_left.y == upper_right.y
            && bottom_left.x == upper_left.x
            && bottom_right.x == upper_right.x;
        if !aligned {
            return Err(GeometryError::InvalidRectangle(format!(
                "corners {} {} {} {} are not axis-aligned",
                bottom_left, upper_left, bottom_right, upper_right
            )));
        }

        let width = bottom_right.x - bottom_left.x;
        let height = upper_left.y - bottom_left.y;
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidRectangle(format!(
                "width {} and height {} must be positive",
                width, height
            )));
        }

        Ok(Rectangle {
            bottom_left,
            upper_left,
            bottom_right,
            upper_right,
            center: Point::new(bottom_left.x + width / 2.0, bottom_left.y + height / 2.0),
            width,
            height,
            bottom: Segment::new(bottom_left, bottom_right)?,
            top: Segment::new(upper_left, upper_right)?,
            left: Segment::new(bottom_left, upper_left)?,
            right: Segment::new(bottom_right, upper_right)?,
        })
    }

    /// Build from the center and the side lengths
    pub fn from_center(center: Point, width: f64, height: f64) -> Result<Self, GeometryError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidRectangle(format!(
                "width {} and height {} must be positive",
                width, height
            )));
        }
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self::from_corners(
            Point::new(center.x - half_w, center.y - half_h),
            Point::new(center.x - half_w, center.y + half_h),
            Point::new(center.x + half_w, center.y - half_h),
            Point::new(center.x + half_w, center.y + half_h),
        )
    }

    /// Unit square covering grid column `col` and row `row`
    pub fn unit_cell(col: u32, row: u32) -> Self {
        let x = col as f64;
        let y = row as f64;
        let bottom_left = Point::new(x, y);
        let upper_left = Point::new(x, y + 1.0);
        let bottom_right = Point::new(x + 1.0, y);
        Rectangle {
            bottom_left,
            upper_left,
            bottom_right,
            upper_right: Point::new(x + 1.0, y + 1.0),
            center: Point::new(x + 0.5, y + 0.5),
            width: 1.0,
            height: 1.0,
            bottom: Segment::unit_along(bottom_left, Axis::X),
            top: Segment::unit_along(upper_left, Axis::X),
            left: Segment::unit_along(bottom_left, Axis::Y),
            right: Segment::unit_along(bottom_right, Axis::Y),
        }
    }

    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    pub fn upper_left(&self) -> Point {
        self.upper_left
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn upper_right(&self) -> Point {
        self.upper_right
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bottom(&self) -> &Segment {
        &self.bottom
    }

    pub fn top(&self) -> &Segment {
        &self.top
    }

    pub fn left(&self) -> &Segment {
        &self.left
    }

    pub fn right(&self) -> &Segment {
        &self.right
    }

    /// Boundary-inclusive containment
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.bottom_left.x
            && point.x <= self.upper_right.x
            && point.y >= self.bottom_left.y
            && point.y <= self.upper_right.y
    }

    /// Euclidean distance from the center
    pub fn distance(&self, point: &Point) -> f64 {
        self.center.distance(point)
    }

    /// Manhattan distance from the center
    pub fn manhattan_distance(&self, point: &Point) -> f64 {
        self.center.manhattan_distance(point)
    }
}
