use crate::error::ObstacleError;
use crate::geometry::{Point, Rectangle, Segment};
use crate::obstacle::{Door, EdgeObstacle, Wall};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer grid position. Row is the y index, column the x index.
///
/// Ordering is lexicographic by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        CellCoord { row, col }
    }

    /// Manhattan distance in cells, equal to the distance between cell centers
    pub fn manhattan_distance(&self, other: &CellCoord) -> u64 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u64
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Side of a cell. North is towards increasing y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// One unit cell and the obstacles on its four sides
#[derive(Debug, Clone)]
pub struct CellNode {
    pub area: Rectangle,
    pub north: EdgeObstacle,
    pub south: EdgeObstacle,
    pub east: EdgeObstacle,
    pub west: EdgeObstacle,
}

impl CellNode {
    pub fn new(area: Rectangle) -> Self {
        CellNode {
            area,
            north: EdgeObstacle::Open,
            south: EdgeObstacle::Open,
            east: EdgeObstacle::Open,
            west: EdgeObstacle::Open,
        }
    }

    pub fn obstacle(&self, direction: Direction) -> EdgeObstacle {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set_obstacle(&mut self, direction: Direction, obstacle: EdgeObstacle) {
        match direction {
            Direction::North => self.north = obstacle,
            Direction::South => self.south = obstacle,
            Direction::East => self.east = obstacle,
            Direction::West => self.west = obstacle,
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.area.contains(point)
    }

    pub fn center(&self) -> Point {
        self.area.center()
    }

    fn clear(&mut self) {
        for direction in Direction::ALL {
            self.set_obstacle(direction, EdgeObstacle::Open);
        }
    }
}

/// Cells are the same cell when they cover the same area
impl PartialEq for CellNode {
    fn eq(&self, other: &Self) -> bool {
        self.area == other.area
    }
}

/// Square grid of unit cells covering [0, size) x [0, size)
#[derive(Debug, Clone)]
pub struct Grid {
    pub size: u32,
    cells: Vec<CellNode>,
    /// Revision number - incremented whenever obstacles change
    pub revision: u64,
}

impl Grid {
    /// Create a grid with every edge open
    pub fn new(size: u32) -> Self {
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            for col in 0..size {
                cells.push(CellNode::new(Rectangle::unit_cell(col, row)));
            }
        }
        Grid {
            size,
            cells,
            revision: 0,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Row-major index of a cell
    pub fn index(&self, coord: CellCoord) -> usize {
        coord.row as usize * self.size as usize + coord.col as usize
    }

    pub fn coord(&self, index: usize) -> CellCoord {
        let size = self.size as usize;
        CellCoord::new((index / size) as u32, (index % size) as u32)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&CellNode> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells.get(self.index(coord))
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &CellNode)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (self.coord(index), cell))
    }

    /// Obstacle on one side of a cell; off-grid coordinates read as a wall
    pub fn obstacle(&self, coord: CellCoord, direction: Direction) -> EdgeObstacle {
        self.cell(coord)
            .map(|cell| cell.obstacle(direction))
            .unwrap_or(EdgeObstacle::Wall)
    }

    /// Adjacent cell in `direction`, if it is on the grid
    pub fn neighbor(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.in_bounds(coord) {
            return None;
        }
        let CellCoord { row, col } = coord;
        let next = match direction {
            Direction::North => CellCoord::new(row.checked_add(1)?, col),
            Direction::South => CellCoord::new(row.checked_sub(1)?, col),
            Direction::East => CellCoord::new(row, col.checked_add(1)?),
            Direction::West => CellCoord::new(row, col.checked_sub(1)?),
        };
        self.in_bounds(next).then_some(next)
    }

    /// All on-grid neighbors tagged with the direction they lie in
    pub fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = (Direction, CellCoord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(coord, direction).map(|n| (direction, n)))
    }

    /// Cells whose (closed) area contains `point`, in ascending coordinate order.
    ///
    /// A point strictly inside a cell yields one cell, a point on a shared
    /// edge two, and a point on an interior grid corner four. Points outside
    /// [0, size] yield nothing.
    pub fn locate_cells(&self, point: &Point) -> Vec<CellCoord> {
        let max = self.size as f64;
        if !(point.x >= 0.0 && point.x <= max && point.y >= 0.0 && point.y <= max) {
            return Vec::new();
        }

        let rows = self.spanning_indices(point.y);
        let cols = self.spanning_indices(point.x);

        let mut found = Vec::with_capacity(rows.len() * cols.len());
        for &row in &rows {
            for &col in &cols {
                let coord = CellCoord::new(row, col);
                if self.cell(coord).is_some_and(|cell| cell.contains(point)) {
                    found.push(coord);
                }
            }
        }
        found
    }

    /// Indices of the unit intervals that contain `value` along one axis
    fn spanning_indices(&self, value: f64) -> Vec<u32> {
        if value.fract() != 0.0 {
            return vec![value.floor() as u32];
        }
        let line = value as u32;
        [line.checked_sub(1), Some(line)]
            .into_iter()
            .flatten()
            .filter(|&index| index < self.size)
            .collect()
    }

    /// Put `obstacle` on the cell sides covered by a unit segment.
    ///
    /// Both cells sharing the boundary are among the candidates for the
    /// segment midpoint, so both sides get the obstacle. Returns the number
    /// of slots written.
    pub fn place_obstacle(&mut self, segment: &Segment, obstacle: EdgeObstacle) -> usize {
        let midpoint = segment.midpoint();
        let mut placed = 0;

        for coord in self.locate_cells(&midpoint) {
            let index = self.index(coord);
            let cell = &mut self.cells[index];
            let sides = if segment.is_horizontal() {
                [
                    (Direction::South, cell.area.bottom().contains_point(&midpoint)),
                    (Direction::North, cell.area.top().contains_point(&midpoint)),
                ]
            } else {
                [
                    (Direction::West, cell.area.left().contains_point(&midpoint)),
                    (Direction::East, cell.area.right().contains_point(&midpoint)),
                ]
            };
            for (direction, on_side) in sides {
                if on_side {
                    cell.set_obstacle(direction, obstacle);
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Check that a segment lies on integer grid lines inside the grid
    pub fn check_segment(&self, segment: &Segment) -> Result<(), ObstacleError> {
        let (start, end) = (segment.start(), segment.end());
        if !start.is_integral() || !end.is_integral() {
            return Err(ObstacleError::OffGrid { start, end });
        }
        let max = self.size as f64;
        let inside = |p: &Point| p.x >= 0.0 && p.x <= max && p.y >= 0.0 && p.y <= max;
        if !inside(&start) || !inside(&end) {
            return Err(ObstacleError::OutOfBounds {
                start,
                end,
                max_coordinate: self.size,
            });
        }
        Ok(())
    }

    /// Place every wall, then every door, so doors replace walls on the same edge.
    ///
    /// All obstacles are checked before anything is placed; on error the grid
    /// is left untouched.
    pub fn add_obstacles(&mut self, walls: &[Wall], doors: &[Door]) -> Result<(), ObstacleError> {
        for wall in walls {
            self.check_segment(wall.segment())?;
        }
        for door in doors {
            self.check_segment(door.segment())?;
        }

        let mut wall_slots = 0;
        for wall in walls {
            for piece in wall.decompose() {
                wall_slots += self.place_obstacle(piece.segment(), EdgeObstacle::Wall);
            }
        }
        let mut door_slots = 0;
        for door in doors {
            door_slots += self.place_obstacle(door.segment(), EdgeObstacle::Door);
        }

        self.revision += 1;
        debug!(
            "[Grid] placed {} walls ({} slots) and {} doors ({} slots), revision {}",
            walls.len(),
            wall_slots,
            doors.len(),
            door_slots,
            self.revision
        );
        Ok(())
    }

    /// Reset every side of every cell to open, keeping the allocation
    pub fn clear_obstacles(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.revision += 1;
    }

    /// Get current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }
}
