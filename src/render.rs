//! Text rendering of a labyrinth and a path through it.
//!
//! The top line of the output is the highest y coordinate.

use crate::error::Endpoint;
use crate::grid::{CellCoord, Direction};
use crate::labyrinth::Labyrinth;
use crate::obstacle::EdgeObstacle;
use crate::pathfinding::resolve_cell;
use std::collections::HashSet;

pub const TESEO_MARK: char = 'T';
pub const MINOTAUR_MARK: char = 'M';
pub const PATH_MARK: char = '*';
pub const EMPTY_MARK: char = '.';

fn cell_marker(
    coord: CellCoord,
    teseo: Option<CellCoord>,
    minotaur: Option<CellCoord>,
    path: &HashSet<CellCoord>,
) -> char {
    if Some(coord) == teseo {
        TESEO_MARK
    } else if Some(coord) == minotaur {
        MINOTAUR_MARK
    } else if path.contains(&coord) {
        PATH_MARK
    } else {
        EMPTY_MARK
    }
}

fn endpoints(labyrinth: &Labyrinth) -> (Option<CellCoord>, Option<CellCoord>) {
    let grid = labyrinth.grid();
    (
        resolve_cell(grid, &labyrinth.teseo(), Endpoint::Teseo).ok(),
        resolve_cell(grid, &labyrinth.minotaur(), Endpoint::Minotaur).ok(),
    )
}

/// One marker per cell, top row first
pub fn render_cells(labyrinth: &Labyrinth, path: &[CellCoord]) -> Vec<Vec<char>> {
    let size = labyrinth.max_coordinate();
    let (teseo, minotaur) = endpoints(labyrinth);
    let on_path: HashSet<CellCoord> = path.iter().copied().collect();

    (0..size)
        .rev()
        .map(|row| {
            (0..size)
                .map(|col| cell_marker(CellCoord::new(row, col), teseo, minotaur, &on_path))
                .collect()
        })
        .collect()
}

fn horizontal_edge(obstacle: EdgeObstacle) -> char {
    match obstacle {
        EdgeObstacle::Wall => '-',
        EdgeObstacle::Door => '=',
        EdgeObstacle::Open => ' ',
    }
}

fn vertical_edge(obstacle: EdgeObstacle) -> char {
    match obstacle {
        EdgeObstacle::Wall => '|',
        EdgeObstacle::Door => ':',
        EdgeObstacle::Open => ' ',
    }
}

/// Cells, grid corners, walls and doors
///
/// `+` marks grid corners, `-` and `|` walls, `=` and `:` doors.
pub fn render_map(labyrinth: &Labyrinth, path: &[CellCoord]) -> String {
    let grid = labyrinth.grid();
    let size = grid.size;
    let (teseo, minotaur) = endpoints(labyrinth);
    let on_path: HashSet<CellCoord> = path.iter().copied().collect();

    let span = 2 * size + 1;
    let mut lines = Vec::with_capacity(span as usize);
    for line in 0..span {
        let mut text = String::with_capacity(span as usize);
        for column in 0..span {
            let symbol = match (line % 2 == 0, column % 2 == 0) {
                (true, true) => '+',
                (true, false) => {
                    // horizontal grid line y, crossing cell column `col`
                    let y = size - line / 2;
                    let col = column / 2;
                    let obstacle = if y > 0 {
                        grid.obstacle(CellCoord::new(y - 1, col), Direction::North)
                    } else {
                        grid.obstacle(CellCoord::new(0, col), Direction::South)
                    };
                    horizontal_edge(obstacle)
                }
                (false, true) => {
                    // vertical grid line x, crossing cell row `row`
                    let x = column / 2;
                    let row = size - 1 - line / 2;
                    let obstacle = if x > 0 {
                        grid.obstacle(CellCoord::new(row, x - 1), Direction::East)
                    } else {
                        grid.obstacle(CellCoord::new(row, 0), Direction::West)
                    };
                    vertical_edge(obstacle)
                }
                (false, false) => {
                    let coord = CellCoord::new(size - 1 - line / 2, column / 2);
                    cell_marker(coord, teseo, minotaur, &on_path)
                }
            };
            text.push(symbol);
        }
        lines.push(text);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::obstacle::{DoorSpec, WallSpec};

    fn labyrinth() -> Labyrinth {
        let mut labyrinth = Labyrinth::new(6, Point::ORIGIN, Point::new(2.5, 2.5)).unwrap();
        labyrinth
            .add_obstacle_specs(
                &[WallSpec::new(2, 2, false, 1), WallSpec::new(2, 2, true, 1)],
                &[DoorSpec::new(3, 2, true)],
            )
            .unwrap();
        labyrinth
    }

    #[test]
    fn test_render_cells() {
        let labyrinth = labyrinth();
        let path = [
            CellCoord::new(0, 0),
            CellCoord::new(0, 1),
            CellCoord::new(1, 1),
        ];
        let cells = render_cells(&labyrinth, &path);
        assert_eq!(cells.len(), 6);
        // bottom row is printed last
        assert_eq!(cells[5].iter().collect::<String>(), "T*....");
        assert_eq!(cells[4][1], PATH_MARK);
        assert_eq!(cells[3][2], MINOTAUR_MARK);
    }

    #[test]
    fn test_render_map_edges() {
        let labyrinth = labyrinth();
        let text = render_map(&labyrinth, &[]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines.iter().all(|l| l.chars().count() == 13));
        assert_eq!(lines[0], "+ + + + + + +");

        // line 8 is y = 2; the wall spans x 2..3, drawn at column 5
        assert_eq!(lines[8].chars().nth(5), Some('-'));
        // line 7 is cell row 2: wall at x = 2 (column 4), door at x = 3 (column 6)
        assert_eq!(lines[7], " . .|M:. . . ");
        assert_eq!(lines[11].chars().nth(1), Some(TESEO_MARK));
    }
}
