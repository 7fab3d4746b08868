#![allow(dead_code)]

use minotaur::error::Endpoint;
use minotaur::pathfinding::{count_doors_on_path, resolve_cell};
use minotaur::{DoorSpec, Labyrinth, Point, Solution, WallSpec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One labyrinth scenario stored as JSON in test_data/
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScenarioFixture {
    pub name: String,
    pub max_coordinate: u32,
    #[serde(default)]
    pub teseo: Point,
    pub minotaur: Point,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub doors: Vec<DoorSpec>,
    pub expected_reachable: bool,
    #[serde(default)]
    pub expected_doors: u32,
}

/// Load a scenario from JSON file
pub fn load_fixture(path: &Path) -> Result<ScenarioFixture, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    let fixture: ScenarioFixture = serde_json::from_str(&contents)?;
    Ok(fixture)
}

/// Every JSON scenario in a directory, sorted by file name
pub fn load_fixtures(dir: &str) -> Vec<ScenarioFixture> {
    let mut entries: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries.filter_map(Result::ok).collect(),
        Err(_) => return Vec::new(),
    };
    entries.sort_by_key(|e| e.file_name());

    entries
        .iter()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .map(|p| load_fixture(&p).unwrap_or_else(|e| panic!("bad fixture {}: {}", p.display(), e)))
        .collect()
}

/// Flip scenario horizontally (mirror left-right)
pub fn flip_horizontal(fixture: &ScenarioFixture) -> ScenarioFixture {
    let max = fixture.max_coordinate as i64;
    let mirror = |p: Point| Point::new(max as f64 - p.x, p.y);
    ScenarioFixture {
        name: format!("{}_h_flip", fixture.name),
        teseo: mirror(fixture.teseo),
        minotaur: mirror(fixture.minotaur),
        walls: fixture
            .walls
            .iter()
            .map(|w| {
                let x = if w.vertical { max - w.x } else { max - w.x - w.length };
                WallSpec::new(x, w.y, w.vertical, w.length)
            })
            .collect(),
        doors: fixture
            .doors
            .iter()
            .map(|d| {
                let x = if d.vertical { max - d.x } else { max - d.x - 1 };
                DoorSpec::new(x, d.y, d.vertical)
            })
            .collect(),
        ..fixture.clone()
    }
}

/// Flip scenario vertically (mirror top-bottom)
pub fn flip_vertical(fixture: &ScenarioFixture) -> ScenarioFixture {
    let max = fixture.max_coordinate as i64;
    let mirror = |p: Point| Point::new(p.x, max as f64 - p.y);
    ScenarioFixture {
        name: format!("{}_v_flip", fixture.name),
        teseo: mirror(fixture.teseo),
        minotaur: mirror(fixture.minotaur),
        walls: fixture
            .walls
            .iter()
            .map(|w| {
                let y = if w.vertical { max - w.y - w.length } else { max - w.y };
                WallSpec::new(w.x, y, w.vertical, w.length)
            })
            .collect(),
        doors: fixture
            .doors
            .iter()
            .map(|d| {
                let y = if d.vertical { max - d.y - 1 } else { max - d.y };
                DoorSpec::new(d.x, y, d.vertical)
            })
            .collect(),
        ..fixture.clone()
    }
}

/// Flip scenario both horizontally and vertically
pub fn flip_both(fixture: &ScenarioFixture) -> ScenarioFixture {
    let mut flipped = flip_vertical(&flip_horizontal(fixture));
    flipped.name = format!("{}_hv_flip", fixture.name);
    flipped
}

pub fn build_labyrinth(fixture: &ScenarioFixture) -> Labyrinth {
    let mut labyrinth = Labyrinth::new(fixture.max_coordinate, fixture.teseo, fixture.minotaur)
        .unwrap_or_else(|e| panic!("{}: {}", fixture.name, e));
    labyrinth
        .add_obstacle_specs(&fixture.walls, &fixture.doors)
        .unwrap_or_else(|e| panic!("{}: {}", fixture.name, e));
    labyrinth
}

/// Check that a reported path starts at Teseo, ends at the Minotaur, moves
/// between adjacent cells, never crosses a wall and crosses exactly the
/// reported number of doors.
pub fn validate_path(labyrinth: &Labyrinth, solution: &Solution) -> Result<(), String> {
    if !solution.reachable {
        return if solution.path.is_empty() && solution.doors_used == 0 {
            Ok(())
        } else {
            Err("unreachable solution carries a path".to_string())
        };
    }

    let grid = labyrinth.grid();
    let start = resolve_cell(grid, &labyrinth.teseo(), Endpoint::Teseo).map_err(|e| e.to_string())?;
    let goal = resolve_cell(grid, &labyrinth.minotaur(), Endpoint::Minotaur).map_err(|e| e.to_string())?;

    if solution.path.first() != Some(&start) {
        return Err(format!("path does not start at {}", start));
    }
    if solution.path.last() != Some(&goal) {
        return Err(format!("path does not end at {}", goal));
    }
    match count_doors_on_path(grid, &solution.path) {
        None => Err("path jumps or crosses a wall".to_string()),
        Some(doors) if doors != solution.doors_used => Err(format!(
            "path crosses {} doors but {} were reported",
            doors, solution.doors_used
        )),
        Some(_) => Ok(()),
    }
}

/// Solve one scenario and compare against its expectations
pub fn run_single_scenario(fixture: &ScenarioFixture) -> Result<Solution, String> {
    let labyrinth = build_labyrinth(fixture);
    let solution = labyrinth.solve().map_err(|e| e.to_string())?;

    if solution.reachable != fixture.expected_reachable {
        return Err(format!(
            "expected reachable={}, got {}",
            fixture.expected_reachable, solution.reachable
        ));
    }
    if solution.reachable && solution.doors_used != fixture.expected_doors {
        return Err(format!(
            "expected {} doors, got {}",
            fixture.expected_doors, solution.doors_used
        ));
    }
    validate_path(&labyrinth, &solution)?;
    Ok(solution)
}

/// Run a scenario with all 4 variants (as written, h_flip, v_flip, hv_flip).
/// Returns the name of the first failing variant and its error.
pub fn run_scenario(fixture: &ScenarioFixture) -> Result<(), (String, String)> {
    let variants = vec![
        fixture.clone(),
        flip_horizontal(fixture),
        flip_vertical(fixture),
        flip_both(fixture),
    ];

    for variant in variants {
        run_single_scenario(&variant).map_err(|e| (variant.name.clone(), e))?;
    }
    Ok(())
}
