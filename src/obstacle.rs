//! Walls, doors and the per-edge obstacle state stored on grid cells

use crate::error::ObstacleError;
use crate::geometry::{Axis, Point, Segment};
use serde::{Deserialize, Serialize};

/// What sits on one side of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeObstacle {
    #[default]
    Open,
    Wall,
    Door,
}

impl EdgeObstacle {
    pub fn is_passable(&self) -> bool {
        !matches!(self, EdgeObstacle::Wall)
    }
}

/// Impassable axis-aligned segment of positive integer length.
///
/// Endpoints are stored left-to-right or bottom-to-top regardless of the
/// order they were given in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    segment: Segment,
}

impl Wall {
    pub fn new(start: Point, end: Point) -> Result<Self, ObstacleError> {
        let segment = Segment::new(start, end)?.normalized();
        let length = segment.length();
        if length.fract() != 0.0 {
            return Err(ObstacleError::NonIntegerLength(length));
        }
        Ok(Wall { segment })
    }

    /// Wall of `length` units starting at `start` and running along `axis`
    pub fn from_origin(start: Point, axis: Axis, length: i64) -> Result<Self, ObstacleError> {
        if length <= 0 {
            return Err(ObstacleError::NonPositiveLength(length));
        }
        let end = match axis {
            Axis::X => Point::new(start.x + length as f64, start.y),
            Axis::Y => Point::new(start.x, start.y + length as f64),
        };
        Self::new(start, end)
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn start(&self) -> Point {
        self.segment.start()
    }

    pub fn end(&self) -> Point {
        self.segment.end()
    }

    pub fn axis(&self) -> Axis {
        self.segment.axis()
    }

    /// Integer length in grid units
    pub fn length(&self) -> u32 {
        self.segment.length() as u32
    }

    /// Split into unit walls covering the same extent, ordered from `start`
    pub fn decompose(&self) -> Vec<Wall> {
        let axis = self.axis();
        let origin = self.start();
        (0..self.length())
            .map(|step| {
                let offset = step as f64;
                let start = match axis {
                    Axis::X => Point::new(origin.x + offset, origin.y),
                    Axis::Y => Point::new(origin.x, origin.y + offset),
                };
                Wall {
                    segment: Segment::unit_along(start, axis),
                }
            })
            .collect()
    }
}

/// Passable unit segment; crossing it costs one door
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Door {
    segment: Segment,
}

impl Door {
    pub const LENGTH: f64 = 1.0;

    pub fn new(start: Point, end: Point) -> Result<Self, ObstacleError> {
        let segment = Segment::new(start, end)?.normalized();
        if segment.length() != Self::LENGTH {
            return Err(ObstacleError::DoorLength(segment.length()));
        }
        Ok(Door { segment })
    }

    pub fn from_origin(start: Point, axis: Axis) -> Result<Self, ObstacleError> {
        let end = match axis {
            Axis::X => Point::new(start.x + Self::LENGTH, start.y),
            Axis::Y => Point::new(start.x, start.y + Self::LENGTH),
        };
        Self::new(start, end)
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn start(&self) -> Point {
        self.segment.start()
    }

    pub fn end(&self) -> Point {
        self.segment.end()
    }

    pub fn axis(&self) -> Axis {
        self.segment.axis()
    }
}

fn axis_for(vertical: bool) -> Axis {
    if vertical {
        Axis::Y
    } else {
        Axis::X
    }
}

/// Wall as it appears in a map description.
///
/// `vertical` set means the wall runs parallel to the Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSpec {
    pub x: i64,
    pub y: i64,
    pub vertical: bool,
    pub length: i64,
}

impl WallSpec {
    pub fn new(x: i64, y: i64, vertical: bool, length: i64) -> Self {
        WallSpec {
            x,
            y,
            vertical,
            length,
        }
    }

    pub fn to_wall(&self) -> Result<Wall, ObstacleError> {
        Wall::from_origin(
            Point::new(self.x as f64, self.y as f64),
            axis_for(self.vertical),
            self.length,
        )
    }
}

/// Door as it appears in a map description; the length is always one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorSpec {
    pub x: i64,
    pub y: i64,
    pub vertical: bool,
}

impl DoorSpec {
    pub fn new(x: i64, y: i64, vertical: bool) -> Self {
        DoorSpec { x, y, vertical }
    }

    pub fn to_door(&self) -> Result<Door, ObstacleError> {
        Door::from_origin(
            Point::new(self.x as f64, self.y as f64),
            axis_for(self.vertical),
        )
    }
}
