use minotaur::pathfinding::{count_doors_on_path, edge_cost};
use minotaur::{Axis, CellCoord, DoorSpec, Grid, Labyrinth, Point, Wall, WallSpec};
use proptest::prelude::*;
use std::collections::VecDeque;

const SIZE: u32 = 8;

/// Fewest doors between two cells by 0-1 breadth-first search
fn reference_doors(grid: &Grid, start: CellCoord, goal: CellCoord) -> Option<u64> {
    let mut best = vec![u64::MAX; grid.cell_count()];
    let mut queue = VecDeque::new();
    best[grid.index(start)] = 0;
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        let cost = best[grid.index(coord)];
        for (direction, next) in grid.neighbors(coord) {
            let Some(step) = edge_cost(grid, coord, direction, 1) else {
                continue;
            };
            let next_index = grid.index(next);
            if cost + step < best[next_index] {
                best[next_index] = cost + step;
                if step == 0 {
                    queue.push_front(next);
                } else {
                    queue.push_back(next);
                }
            }
        }
    }

    let found = best[grid.index(goal)];
    (found != u64::MAX).then_some(found)
}

fn arb_wall() -> impl Strategy<Value = WallSpec> {
    (0i64..=SIZE as i64, 0i64..=SIZE as i64, any::<bool>(), 1i64..=4)
        .prop_map(|(x, y, vertical, length)| {
            // keep the far end on the grid
            if vertical {
                WallSpec::new(x, y.min(SIZE as i64 - length), true, length)
            } else {
                WallSpec::new(x.min(SIZE as i64 - length), y, false, length)
            }
        })
}

fn arb_door() -> impl Strategy<Value = DoorSpec> {
    (0i64..=SIZE as i64, 0i64..=SIZE as i64, any::<bool>()).prop_map(|(x, y, vertical)| {
        if vertical {
            DoorSpec::new(x, y.min(SIZE as i64 - 1), true)
        } else {
            DoorSpec::new(x.min(SIZE as i64 - 1), y, false)
        }
    })
}

fn expected_cells_along(value: f64) -> usize {
    if value.fract() != 0.0 || value == 0.0 || value == SIZE as f64 {
        1
    } else {
        2
    }
}

proptest! {
    #[test]
    fn decomposed_walls_cover_the_whole_wall(
        x in 0i64..50,
        y in 0i64..50,
        vertical in any::<bool>(),
        length in 1i64..30,
    ) {
        let axis = if vertical { Axis::Y } else { Axis::X };
        let wall = Wall::from_origin(Point::new(x as f64, y as f64), axis, length).unwrap();
        let pieces = wall.decompose();

        prop_assert_eq!(pieces.len(), length as usize);
        prop_assert_eq!(pieces[0].start(), wall.start());
        prop_assert_eq!(pieces[pieces.len() - 1].end(), wall.end());
        for pair in pieces.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start());
        }
        for piece in &pieces {
            prop_assert_eq!(piece.length(), 1);
            prop_assert_eq!(piece.axis(), axis);
        }
    }

    #[test]
    fn located_cell_count_follows_grid_lines(
        x2 in 0u32..=(2 * SIZE),
        y2 in 0u32..=(2 * SIZE),
    ) {
        // Half-unit steps hit cell centers, grid lines and corners
        let point = Point::new(x2 as f64 / 2.0, y2 as f64 / 2.0);
        let grid = Grid::new(SIZE);
        let cells = grid.locate_cells(&point);

        prop_assert_eq!(cells.len(), expected_cells_along(point.x) * expected_cells_along(point.y));
        prop_assert!(cells.windows(2).all(|w| w[0] < w[1]));
        for coord in &cells {
            prop_assert!(grid.cell(*coord).is_some_and(|cell| cell.contains(&point)));
        }
    }

    #[test]
    fn astar_finds_the_fewest_doors(
        walls in prop::collection::vec(arb_wall(), 0..25),
        doors in prop::collection::vec(arb_door(), 0..10),
        goal_col in 0u32..SIZE,
        goal_row in 0u32..SIZE,
    ) {
        let minotaur = Point::new(goal_col as f64 + 0.5, goal_row as f64 + 0.5);
        let mut labyrinth = Labyrinth::new(SIZE, Point::ORIGIN, minotaur).unwrap();
        labyrinth.add_obstacle_specs(&walls, &doors).unwrap();
        let solution = labyrinth.solve().unwrap();

        let expected = reference_doors(
            labyrinth.grid(),
            CellCoord::new(0, 0),
            CellCoord::new(goal_row, goal_col),
        );
        prop_assert_eq!(solution.reachable, expected.is_some());
        if let Some(doors_needed) = expected {
            prop_assert_eq!(solution.doors_used as u64, doors_needed);
            prop_assert_eq!(
                count_doors_on_path(labyrinth.grid(), &solution.path),
                Some(solution.doors_used)
            );
        }
    }
}
