use arboard::Clipboard;
use env_logger::Env;
use log::{error, info, warn};
use macroquad::prelude::*;
use minotaur::config::DEFAULT_CONFIG_PATH;
use minotaur::render::render_map;
use minotaur::{
    load_maps, CellCoord, Config, Direction, EdgeObstacle, Labyrinth, LabyrinthError, MapDescription, Solution,
};
use std::collections::HashSet;

const MARGIN: f32 = 10.0;
const INFO_HEIGHT: f32 = 110.0;

/// Visualization state
struct VisState {
    labyrinth: Labyrinth,
    maps: Vec<MapDescription>,
    current: usize,
    outcome: Result<Solution, String>,
    path_cells: HashSet<CellCoord>,
    cell_size: f32,
    background: Color,
    show_path: bool,
}

impl VisState {
    fn new(config: &Config, maps: Vec<MapDescription>) -> Result<Self, LabyrinthError> {
        let labyrinth = Labyrinth::with_search(
            config.labyrinth.max_coordinate,
            config.teseo(),
            config.teseo(),
            config.to_search_config(),
        )?;

        let mut state = VisState {
            labyrinth,
            maps,
            current: 0,
            outcome: Err("no map loaded".to_string()),
            path_cells: HashSet::new(),
            cell_size: config.visual.cell_size,
            background: Color::from_rgba(
                config.visual.background_r,
                config.visual.background_g,
                config.visual.background_b,
                255,
            ),
            show_path: config.visual.show_path,
        };
        state.show(0);
        Ok(state)
    }

    fn show(&mut self, index: usize) {
        let Some(map) = self.maps.get(index) else {
            return;
        };
        self.current = index;
        self.outcome = self
            .labyrinth
            .load_map(map)
            .and_then(|_| self.labyrinth.solve())
            .map_err(|e| e.to_string());
        self.path_cells = match &self.outcome {
            Ok(solution) => solution.path.iter().copied().collect(),
            Err(e) => {
                warn!("Map {}: {}", index, e);
                HashSet::new()
            }
        };
    }

    fn next(&mut self) {
        if self.current + 1 < self.maps.len() {
            self.show(self.current + 1);
        }
    }

    fn previous(&mut self) {
        if self.current > 0 {
            self.show(self.current - 1);
        }
    }

    fn map_to_string(&self) -> String {
        let path: Vec<CellCoord> = self.path_cells.iter().copied().collect();
        render_map(&self.labyrinth, &path)
    }

    fn copy_to_clipboard(&self) {
        let text = self.map_to_string();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Map {} copied to clipboard", self.current);
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    /// Screen position of the top-left corner of a cell; row 0 is drawn at the bottom
    fn cell_origin(&self, coord: CellCoord) -> (f32, f32) {
        let size = self.labyrinth.max_coordinate();
        let px = MARGIN + coord.col as f32 * self.cell_size;
        let py = INFO_HEIGHT + (size - 1 - coord.row) as f32 * self.cell_size;
        (px, py)
    }

    fn draw_edge(&self, coord: CellCoord, direction: Direction) {
        let color = match self.labyrinth.grid().obstacle(coord, direction) {
            EdgeObstacle::Open => return,
            EdgeObstacle::Wall => LIGHTGRAY,
            EdgeObstacle::Door => ORANGE,
        };
        let (px, py) = self.cell_origin(coord);
        let s = self.cell_size;
        let (x1, y1, x2, y2) = match direction {
            Direction::North => (px, py, px + s, py),
            Direction::South => (px, py + s, px + s, py + s),
            Direction::East => (px + s, py, px + s, py + s),
            Direction::West => (px, py, px, py + s),
        };
        draw_line(x1, y1, x2, y2, (s / 3.0).max(1.0), color);
    }

    fn draw(&self) {
        clear_background(self.background);

        let grid = self.labyrinth.grid();
        let teseo = grid.locate_cells(&self.labyrinth.teseo()).first().copied();
        let minotaur = grid.locate_cells(&self.labyrinth.minotaur()).first().copied();

        // Draw cells
        for (coord, _) in grid.cells() {
            let color = if Some(coord) == teseo {
                BLUE
            } else if Some(coord) == minotaur {
                RED
            } else if self.show_path && self.path_cells.contains(&coord) {
                Color::from_rgba(100, 200, 100, 255)
            } else {
                continue;
            };
            let (px, py) = self.cell_origin(coord);
            draw_rectangle(px, py, self.cell_size, self.cell_size, color);
        }

        // Each interior edge is stored on both cells; draw north and east only,
        // plus the outer south and west boundary
        for (coord, _) in grid.cells() {
            self.draw_edge(coord, Direction::North);
            self.draw_edge(coord, Direction::East);
            if coord.row == 0 {
                self.draw_edge(coord, Direction::South);
            }
            if coord.col == 0 {
                self.draw_edge(coord, Direction::West);
            }
        }

        // Draw info
        let result = match &self.outcome {
            Ok(solution) if solution.reachable => format!("Number of doors = {}", solution.doors_used),
            Ok(_) => "No path".to_string(),
            Err(e) => format!("Error: {}", e),
        };
        let info = [
            format!("Map {} of {}", self.current + 1, self.maps.len()),
            result,
            "Right/N: next map   Left/P: previous map".to_string(),
            "C: copy map to clipboard   Esc: close window".to_string(),
        ];
        for (i, line) in info.iter().enumerate() {
            draw_text(line, MARGIN, 20.0 + i as f32 * 22.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    // logging is not up yet; main reports the config origin
    let (config, _) = Config::load_or_default(DEFAULT_CONFIG_PATH);
    let side = config.labyrinth.max_coordinate as f32 * config.visual.cell_size;
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (side + 2.0 * MARGIN) as i32,
        window_height: (side + INFO_HEIGHT + MARGIN) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, origin) = Config::load_or_default(DEFAULT_CONFIG_PATH);
    env_logger::Builder::from_env(Env::default().default_filter_or(config.logging.level.as_str())).init();
    origin.log();

    let maps = match load_maps(&config.batch.input_path) {
        Ok(maps) if !maps.is_empty() => maps,
        Ok(_) => {
            error!("No maps in {}", config.batch.input_path);
            return;
        }
        Err(e) => {
            error!("Failed to load {}: {}", config.batch.input_path, e);
            return;
        }
    };
    info!("Loaded {} maps from {}", maps.len(), config.batch.input_path);

    let mut state = match VisState::new(&config, maps) {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    loop {
        // Handle input
        if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::N) {
            state.next();
        }
        if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::P) {
            state.previous();
        }

        // Copy map to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }

        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        // Draw
        state.draw();

        next_frame().await
    }
}
