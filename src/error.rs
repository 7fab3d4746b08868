//! Error types for the labyrinth solver

use crate::geometry::Point;
use thiserror::Error;

/// Invalid geometric construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("segment {start} -> {end} is not parallel to the X or Y axis")]
    NotAxisAligned { start: Point, end: Point },

    #[error("segment endpoints coincide at {0}")]
    Degenerate(Point),

    #[error("invalid rectangle: {0}")]
    InvalidRectangle(String),
}

/// Invalid wall or door
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObstacleError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("wall length {0} is not an integer")]
    NonIntegerLength(f64),

    #[error("wall length {0} must be positive")]
    NonPositiveLength(i64),

    #[error("door length must be exactly 1, got {0}")]
    DoorLength(f64),

    #[error("obstacle {start} -> {end} does not lie on integer grid lines")]
    OffGrid { start: Point, end: Point },

    #[error("obstacle {start} -> {end} lies outside [0, {max_coordinate}]")]
    OutOfBounds {
        start: Point,
        end: Point,
        max_coordinate: u32,
    },
}

/// Which end of the search a position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Teseo,
    Minotaur,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Teseo => write!(f, "Teseo"),
            Endpoint::Minotaur => write!(f, "Minotaur"),
        }
    }
}

/// Invalid labyrinth or search setup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("max coordinate {got} is below the minimum of {min}")]
    GridTooSmall { got: u32, min: u32 },

    #[error("{endpoint} position {point} is outside the grid [0, {max_coordinate}]")]
    PositionOutOfBounds {
        endpoint: Endpoint,
        point: Point,
        max_coordinate: u32,
    },

    #[error("door cost multiplier {0} is too low, must be at least 2")]
    DoorCostTooLow(u32),
}

/// Malformed map description file
#[derive(Error, Debug)]
pub enum MapFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("line {line}: {source}")]
    Obstacle {
        line: usize,
        #[source]
        source: ObstacleError,
    },
}

/// Crate-wide error
#[derive(Error, Debug)]
pub enum LabyrinthError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("obstacle error: {0}")]
    Obstacle(#[from] ObstacleError),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("map file error: {0}")]
    MapFile(#[from] MapFileError),

    #[error("search gave up after expanding {0} cells")]
    ExpansionLimit(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("report error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabyrinthError>;
