pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod labyrinth;
pub mod map_file;
pub mod obstacle;
pub mod pathfinding;
pub mod render;
pub mod report;

pub use config::Config;
pub use error::{LabyrinthError, Result};
pub use geometry::{Axis, Point, Rectangle, Segment};
pub use grid::{CellCoord, Direction, Grid};
pub use labyrinth::Labyrinth;
pub use map_file::{load_maps, parse_maps, MapDescription};
pub use obstacle::{Door, DoorSpec, EdgeObstacle, Wall, WallSpec};
pub use pathfinding::{find_path, format_path, SearchConfig, Solution};
pub use report::{BatchReport, MapReport};
