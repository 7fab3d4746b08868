use crate::error::{ConfigurationError, LabyrinthError, MapFileError, ObstacleError};
use crate::geometry::Point;
use crate::grid::Grid;
use crate::map_file::MapDescription;
use crate::obstacle::{Door, DoorSpec, Wall, WallSpec};
use crate::pathfinding::{self, SearchConfig, Solution};
use log::debug;

/// Smallest grid that still leaves room for an interior
pub const MIN_COORDINATE: u32 = 6;

/// Teseo, the Minotaur and the walled grid between them.
///
/// One instance can be reused across many maps: clear the obstacles, add the
/// next map's walls and doors, move the Minotaur and solve again.
#[derive(Debug, Clone)]
pub struct Labyrinth {
    teseo: Point,
    minotaur: Point,
    grid: Grid,
    search: SearchConfig,
}

impl Labyrinth {
    pub fn new(max_coordinate: u32, teseo: Point, minotaur: Point) -> Result<Self, ConfigurationError> {
        Self::with_search(max_coordinate, teseo, minotaur, SearchConfig::default())
    }

    pub fn with_search(
        max_coordinate: u32,
        teseo: Point,
        minotaur: Point,
        search: SearchConfig,
    ) -> Result<Self, ConfigurationError> {
        if max_coordinate < MIN_COORDINATE {
            return Err(ConfigurationError::GridTooSmall {
                got: max_coordinate,
                min: MIN_COORDINATE,
            });
        }
        search.validate()?;

        Ok(Labyrinth {
            teseo,
            minotaur,
            grid: Grid::new(max_coordinate),
            search,
        })
    }

    pub fn max_coordinate(&self) -> u32 {
        self.grid.size
    }

    pub fn teseo(&self) -> Point {
        self.teseo
    }

    pub fn minotaur(&self) -> Point {
        self.minotaur
    }

    pub fn set_teseo(&mut self, teseo: Point) {
        self.teseo = teseo;
    }

    pub fn set_minotaur(&mut self, minotaur: Point) {
        self.minotaur = minotaur;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// Place walls first and doors second; doors win on shared edges
    pub fn add_obstacles(&mut self, walls: &[Wall], doors: &[Door]) -> Result<(), ObstacleError> {
        self.grid.add_obstacles(walls, doors)
    }

    /// Build walls and doors from map records and place them
    pub fn add_obstacle_specs(&mut self, walls: &[WallSpec], doors: &[DoorSpec]) -> Result<(), LabyrinthError> {
        let walls = walls
            .iter()
            .map(WallSpec::to_wall)
            .collect::<Result<Vec<_>, _>>()?;
        let doors = doors
            .iter()
            .map(DoorSpec::to_door)
            .collect::<Result<Vec<_>, _>>()?;
        self.add_obstacles(&walls, &doors)?;
        Ok(())
    }

    pub fn clear_obstacles(&mut self) {
        self.grid.clear_obstacles();
    }

    /// Replace the current obstacles and Minotaur with those of `map`.
    ///
    /// Errors name the input line of the offending wall or door. If the map
    /// is rejected the grid is left empty.
    pub fn load_map(&mut self, map: &MapDescription) -> Result<(), LabyrinthError> {
        self.clear_obstacles();
        self.minotaur = map.minotaur;

        let (walls, doors) = map.obstacles()?;
        for (i, wall) in walls.iter().enumerate() {
            self.grid
                .check_segment(wall.segment())
                .map_err(|source| MapFileError::Obstacle {
                    line: map.wall_line(i),
                    source,
                })?;
        }
        for (i, door) in doors.iter().enumerate() {
            self.grid
                .check_segment(door.segment())
                .map_err(|source| MapFileError::Obstacle {
                    line: map.door_line(i),
                    source,
                })?;
        }
        self.add_obstacles(&walls, &doors)?;
        Ok(())
    }

    /// Minimum-door path from Teseo to the Minotaur
    pub fn solve(&self) -> Result<Solution, LabyrinthError> {
        let solution = pathfinding::find_path(&self.grid, &self.teseo, &self.minotaur, &self.search)?;
        debug!(
            "[Labyrinth] {} -> {}: reachable={} doors={} path={} cells",
            self.teseo,
            self.minotaur,
            solution.reachable,
            solution.doors_used,
            solution.path.len()
        );
        debug_assert!(
            !solution.reachable
                || pathfinding::count_doors_on_path(&self.grid, &solution.path)
                    == Some(solution.doors_used)
        );
        Ok(solution)
    }
}
