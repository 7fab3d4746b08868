//! A* search for the path that crosses the fewest doors.
//!
//! Open edges cost nothing, doors cost `door_cost` and walls are never
//! crossed, so the cost of any path is a whole number of doors. The
//! heuristic is the Manhattan distance between cell centers. It can exceed
//! the true remaining cost, so `door_cost` must be larger than the biggest
//! possible heuristic value, `2 * (size - 1)`; with that margin a route
//! through one extra door can never look cheaper than a door-free detour.

use crate::error::{ConfigurationError, Endpoint, LabyrinthError};
use crate::geometry::Point;
use crate::grid::{CellCoord, Direction, Grid};
use crate::obstacle::EdgeObstacle;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Smallest multiplier keeping `door_cost` above every heuristic value
pub const MIN_DOOR_COST_MULTIPLIER: u32 = 2;

/// Search tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Door cost is this times the grid size
    pub door_cost_multiplier: u32,
    /// Give up after expanding this many cells (0 = unlimited)
    pub max_expansions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            door_cost_multiplier: MIN_DOOR_COST_MULTIPLIER,
            max_expansions: 0,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.door_cost_multiplier < MIN_DOOR_COST_MULTIPLIER {
            return Err(ConfigurationError::DoorCostTooLow(self.door_cost_multiplier));
        }
        Ok(())
    }

    /// Cost of crossing one door on a grid of `size` cells per side
    pub fn door_cost(&self, size: u32) -> u64 {
        self.door_cost_multiplier as u64 * size as u64
    }
}

/// Outcome of a search. An unreachable goal is a normal result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub reachable: bool,
    /// Cells from start to goal inclusive (empty if unreachable)
    pub path: Vec<CellCoord>,
    pub doors_used: u32,
    /// Accumulated edge cost at the goal
    pub cost: u64,
    /// Number of cells popped from the frontier
    pub nodes_expanded: usize,
}

impl Solution {
    fn unreachable(nodes_expanded: usize) -> Self {
        Solution {
            reachable: false,
            path: Vec::new(),
            doors_used: 0,
            cost: 0,
            nodes_expanded,
        }
    }
}

/// A frontier entry
#[derive(Debug, Clone, PartialEq, Eq)]
struct PathNode {
    coord: CellCoord,
    cost: u64,
    priority: u64,
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .priority
            .cmp(&self.priority)
            // Tie-breaker: lower coordinate first
            .then_with(|| other.coord.cmp(&self.coord))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

/// Cost of leaving `coord` through its `direction` side; `None` for a wall
pub fn edge_cost(grid: &Grid, coord: CellCoord, direction: Direction, door_cost: u64) -> Option<u64> {
    match grid.obstacle(coord, direction) {
        EdgeObstacle::Open => Some(0),
        EdgeObstacle::Door => Some(door_cost),
        EdgeObstacle::Wall => None,
    }
}

/// Resolve a position to a single cell.
///
/// A point on a boundary lies in several cells; the lowest coordinate
/// (row first, then column) is used.
pub fn resolve_cell(
    grid: &Grid,
    point: &Point,
    endpoint: Endpoint,
) -> Result<CellCoord, ConfigurationError> {
    grid.locate_cells(point)
        .into_iter()
        .min()
        .ok_or(ConfigurationError::PositionOutOfBounds {
            endpoint,
            point: *point,
            max_coordinate: grid.size,
        })
}

/// Find the minimum-door path between two positions
pub fn find_path(
    grid: &Grid,
    teseo: &Point,
    minotaur: &Point,
    config: &SearchConfig,
) -> Result<Solution, LabyrinthError> {
    config.validate()?;
    let start = resolve_cell(grid, teseo, Endpoint::Teseo)?;
    let goal = resolve_cell(grid, minotaur, Endpoint::Minotaur)?;
    search(grid, start, goal, config)
}

/// A* between two cells already known to be on the grid
pub fn search(
    grid: &Grid,
    start: CellCoord,
    goal: CellCoord,
    config: &SearchConfig,
) -> Result<Solution, LabyrinthError> {
    let door_cost = config.door_cost(grid.size);
    trace!(
        "[AStar] search: start={} goal={} door_cost={}",
        start,
        goal,
        door_cost
    );

    let cell_count = grid.cell_count();
    let mut cost_so_far = vec![u64::MAX; cell_count];
    let mut came_from: Vec<Option<usize>> = vec![None; cell_count];
    let mut frontier = BinaryHeap::new();

    cost_so_far[grid.index(start)] = 0;
    frontier.push(PathNode {
        coord: start,
        cost: 0,
        priority: 0,
    });

    let mut expanded = 0;
    while let Some(node) = frontier.pop() {
        let current = grid.index(node.coord);

        // Skip if already reached with a lower cost
        if node.cost > cost_so_far[current] {
            continue;
        }

        expanded += 1;
        if config.max_expansions > 0 && expanded > config.max_expansions {
            debug!("[AStar] giving up after {} expansions", config.max_expansions);
            return Err(LabyrinthError::ExpansionLimit(config.max_expansions));
        }

        if node.coord == goal {
            let path = reconstruct_path(grid, &came_from, current);
            let doors_used = (node.cost / door_cost) as u32;
            debug!(
                "[AStar] reached goal: {} cells, {} doors, {} expanded",
                path.len(),
                doors_used,
                expanded
            );
            return Ok(Solution {
                reachable: true,
                path,
                doors_used,
                cost: node.cost,
                nodes_expanded: expanded,
            });
        }

        for (direction, next) in grid.neighbors(node.coord) {
            let Some(step) = edge_cost(grid, node.coord, direction, door_cost) else {
                continue;
            };
            let new_cost = node.cost + step;
            let next_index = grid.index(next);
            if new_cost < cost_so_far[next_index] {
                cost_so_far[next_index] = new_cost;
                came_from[next_index] = Some(current);
                let priority = new_cost + next.manhattan_distance(&goal);
                trace!(
                    "[AStar] relax {} -> {} cost={} priority={}",
                    node.coord,
                    next,
                    new_cost,
                    priority
                );
                frontier.push(PathNode {
                    coord: next,
                    cost: new_cost,
                    priority,
                });
            }
        }
    }

    debug!("[AStar] goal {} unreachable after {} expansions", goal, expanded);
    Ok(Solution::unreachable(expanded))
}

/// Follow predecessor links back to the start and return start -> goal
fn reconstruct_path(grid: &Grid, came_from: &[Option<usize>], goal: usize) -> Vec<CellCoord> {
    let mut path = vec![grid.coord(goal)];
    let mut current = goal;
    while let Some(previous) = came_from[current] {
        path.push(grid.coord(previous));
        current = previous;
    }
    path.reverse();
    path
}

/// Count the doors crossed along a path.
///
/// Returns `None` if two consecutive cells are not adjacent or are
/// separated by a wall.
pub fn count_doors_on_path(grid: &Grid, path: &[CellCoord]) -> Option<u32> {
    let mut doors = 0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let direction = Direction::ALL
            .into_iter()
            .find(|&d| grid.neighbor(from, d) == Some(to))?;
        match grid.obstacle(from, direction) {
            EdgeObstacle::Wall => return None,
            EdgeObstacle::Door => doors += 1,
            EdgeObstacle::Open => {}
        }
    }
    Some(doors)
}

/// Format path for display
pub fn format_path(path: &[CellCoord]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }
    path.iter()
        .map(|coord| coord.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
