//! Batch map description files.
//!
//! A file holds any number of labyrinths back to back:
//!
//! ```text
//! M N          wall count and door count ("-1 -1" ends the file)
//! x y p len    M walls: start point, p = 1 parallel to Y, p = 0 parallel to X
//! x y p        N doors, always one unit long
//! mx my        Minotaur position
//! ```
//!
//! Blank lines are skipped. Reaching the end of the file between two maps
//! also ends the input.
//!
//! Parsing only checks the syntax. Walls and doors are built when a map is
//! loaded into a labyrinth, so one bad obstacle fails that map alone.

use crate::error::MapFileError;
use crate::geometry::Point;
use crate::obstacle::{Door, DoorSpec, Wall, WallSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// One labyrinth read from a map file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDescription {
    pub walls: Vec<WallSpec>,
    pub doors: Vec<DoorSpec>,
    pub minotaur: Point,
    /// Input line of each wall, parallel to `walls`
    #[serde(default)]
    pub wall_lines: Vec<usize>,
    /// Input line of each door, parallel to `doors`
    #[serde(default)]
    pub door_lines: Vec<usize>,
}

impl MapDescription {
    /// A map that did not come from a file; errors report line 0
    pub fn new(walls: Vec<WallSpec>, doors: Vec<DoorSpec>, minotaur: Point) -> Self {
        MapDescription {
            walls,
            doors,
            minotaur,
            wall_lines: Vec::new(),
            door_lines: Vec::new(),
        }
    }

    pub fn wall_line(&self, index: usize) -> usize {
        self.wall_lines.get(index).copied().unwrap_or(0)
    }

    pub fn door_line(&self, index: usize) -> usize {
        self.door_lines.get(index).copied().unwrap_or(0)
    }

    /// Build the walls and doors, naming the input line of the first bad record
    pub fn obstacles(&self) -> Result<(Vec<Wall>, Vec<Door>), MapFileError> {
        let walls = self
            .walls
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.to_wall().map_err(|source| MapFileError::Obstacle {
                    line: self.wall_line(i),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let doors = self
            .doors
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                spec.to_door().map_err(|source| MapFileError::Obstacle {
                    line: self.door_line(i),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok((walls, doors))
    }
}

/// Non-blank lines with their 1-based line numbers
struct Records<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Records {
            lines: text.lines().enumerate(),
        }
    }

    fn next_record(&mut self) -> Option<(usize, Vec<&'a str>)> {
        for (index, line) in self.lines.by_ref() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if !fields.is_empty() {
                return Some((index + 1, fields));
            }
        }
        None
    }

    /// Next record, which must exist and have exactly `count` fields
    fn require(&mut self, count: usize, what: &str) -> Result<(usize, Vec<&'a str>), MapFileError> {
        let (line, fields) = self.next_record().ok_or_else(|| MapFileError::Format {
            line: 0,
            message: format!("unexpected end of file while reading {}", what),
        })?;
        if fields.len() != count {
            return Err(MapFileError::Format {
                line,
                message: format!("{} needs {} fields, found {}", what, count, fields.len()),
            });
        }
        Ok((line, fields))
    }
}

fn parse_field<T: FromStr>(field: &str, line: usize, what: &str) -> Result<T, MapFileError> {
    field.parse().map_err(|_| MapFileError::Format {
        line,
        message: format!("invalid {} '{}'", what, field),
    })
}

fn parse_count(field: &str, line: usize, what: &str) -> Result<usize, MapFileError> {
    let count: i64 = parse_field(field, line, what)?;
    usize::try_from(count).map_err(|_| MapFileError::Format {
        line,
        message: format!("{} must not be negative, got {}", what, count),
    })
}

/// Parse every labyrinth in `text`
pub fn parse_maps(text: &str) -> Result<Vec<MapDescription>, MapFileError> {
    let mut records = Records::new(text);
    let mut maps = Vec::new();

    while let Some((line, fields)) = records.next_record() {
        if fields.len() != 2 {
            return Err(MapFileError::Format {
                line,
                message: format!("header needs 2 fields, found {}", fields.len()),
            });
        }
        let wall_count: i64 = parse_field(fields[0], line, "wall count")?;
        let door_count: i64 = parse_field(fields[1], line, "door count")?;
        if wall_count == -1 || door_count == -1 {
            break;
        }
        let wall_count = parse_count(fields[0], line, "wall count")?;
        let door_count = parse_count(fields[1], line, "door count")?;

        let mut walls = Vec::with_capacity(wall_count);
        let mut wall_lines = Vec::with_capacity(wall_count);
        for _ in 0..wall_count {
            let (line, fields) = records.require(4, "wall")?;
            walls.push(WallSpec::new(
                parse_field(fields[0], line, "x")?,
                parse_field(fields[1], line, "y")?,
                parse_field::<i64>(fields[2], line, "orientation")? != 0,
                parse_field(fields[3], line, "length")?,
            ));
            wall_lines.push(line);
        }

        let mut doors = Vec::with_capacity(door_count);
        let mut door_lines = Vec::with_capacity(door_count);
        for _ in 0..door_count {
            let (line, fields) = records.require(3, "door")?;
            doors.push(DoorSpec::new(
                parse_field(fields[0], line, "x")?,
                parse_field(fields[1], line, "y")?,
                parse_field::<i64>(fields[2], line, "orientation")? != 0,
            ));
            door_lines.push(line);
        }

        let (line, fields) = records.require(2, "Minotaur position")?;
        let minotaur = Point::new(
            parse_field(fields[0], line, "x")?,
            parse_field(fields[1], line, "y")?,
        );

        maps.push(MapDescription {
            walls,
            doors,
            minotaur,
            wall_lines,
            door_lines,
        });
    }

    Ok(maps)
}

/// Read and parse a map file
pub fn load_maps(path: impl AsRef<Path>) -> Result<Vec<MapDescription>, MapFileError> {
    let text = fs::read_to_string(path)?;
    parse_maps(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ObstacleError;

    const TWO_MAPS: &str = "\
2 1
2 2 0 1
2 2 1 1
3 2 1
2.5 2.5

0 0
4.5 1.5
-1 -1
";

    #[test]
    fn test_parse_two_maps() {
        let maps = parse_maps(TWO_MAPS).unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(
            maps[0].walls,
            vec![WallSpec::new(2, 2, false, 1), WallSpec::new(2, 2, true, 1)]
        );
        assert_eq!(maps[0].doors, vec![DoorSpec::new(3, 2, true)]);
        assert_eq!(maps[0].wall_lines, vec![2, 3]);
        assert_eq!(maps[0].door_lines, vec![4]);
        assert_eq!(maps[0].minotaur, Point::new(2.5, 2.5));
        assert!(maps[1].walls.is_empty());
        assert_eq!(maps[1].minotaur, Point::new(4.5, 1.5));
    }

    #[test]
    fn test_terminator_stops_reading() {
        let maps = parse_maps("0 0\n1.5 1.5\n-1 -1\ngarbage that is never read\n").unwrap();
        assert_eq!(maps.len(), 1);
    }

    #[test]
    fn test_end_of_file_without_terminator() {
        let maps = parse_maps("0 0\n1.5 1.5\n").unwrap();
        assert_eq!(maps.len(), 1);
        assert!(parse_maps("").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = parse_maps("1 0\n2 2 0\n1.5 1.5\n").unwrap_err();
        match err {
            MapFileError::Format { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("wall"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let err = parse_maps("-2 0\n").unwrap_err();
        assert!(matches!(err, MapFileError::Format { line: 1, .. }));
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = parse_maps("0 0\nx 1.5\n").unwrap_err();
        assert!(matches!(err, MapFileError::Format { line: 2, .. }));
    }

    #[test]
    fn test_invalid_obstacle_does_not_stop_parsing() {
        let maps = parse_maps("0 0\n1.5 1.5\n1 0\n0 0 0 0\n1.5 1.5\n0 0\n2.5 2.5\n-1 -1\n").unwrap();
        assert_eq!(maps.len(), 3);
        assert_eq!(maps[1].walls, vec![WallSpec::new(0, 0, false, 0)]);
        assert_eq!(maps[1].wall_lines, vec![4]);
        assert!(maps[0].obstacles().is_ok());
        assert!(maps[2].obstacles().is_ok());
    }

    #[test]
    fn test_invalid_obstacle_reports_line() {
        let maps = parse_maps("0 0\n1.5 1.5\n1 1\n\n3 3 1 0\n2 2 0\n1.5 1.5\n").unwrap();
        let err = maps[1].obstacles().unwrap_err();
        match err {
            MapFileError::Obstacle { line, source } => {
                assert_eq!(line, 5);
                assert_eq!(source, ObstacleError::NonPositiveLength(0));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_obstacle_line_lookup() {
        let maps = parse_maps("0 1\n1 1 1\n1.5 1.5\n").unwrap();
        assert!(maps[0].obstacles().is_ok());

        let map = MapDescription {
            doors: vec![DoorSpec::new(1, 1, true)],
            door_lines: vec![7],
            ..MapDescription::new(Vec::new(), Vec::new(), Point::new(1.5, 1.5))
        };
        assert!(map.obstacles().is_ok());
        assert_eq!(map.door_line(0), 7);
        assert_eq!(map.wall_line(0), 0);
    }

    #[test]
    fn test_truncated_map() {
        let err = parse_maps("0 1\n").unwrap_err();
        assert!(matches!(err, MapFileError::Format { .. }));
    }
}
