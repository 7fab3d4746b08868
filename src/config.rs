use crate::error::LabyrinthError;
use crate::geometry::Point;
use crate::pathfinding::SearchConfig;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub labyrinth: LabyrinthConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabyrinthConfig {
    #[serde(default = "default_max_coordinate")]
    pub max_coordinate: u32,
    #[serde(default)]
    pub teseo_x: f64,
    #[serde(default)]
    pub teseo_y: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_door_cost_multiplier")]
    pub door_cost_multiplier: u32,
    #[serde(default)]
    pub max_expansions: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_input_path")]
    pub input_path: String,
    /// Empty means no report is written
    #[serde(default)]
    pub report_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
    #[serde(default = "default_show_path")]
    pub show_path: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter for env_logger; RUST_LOG still wins
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_max_coordinate() -> u32 { 200 }
fn default_door_cost_multiplier() -> u32 { 2 }
fn default_input_path() -> String { "data_files/input.txt".to_string() }
fn default_window_title() -> String { "Minotaur - Labyrinth Viewer".to_string() }
fn default_cell_size() -> f32 { 4.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_show_path() -> bool { true }
fn default_log_level() -> String { "info".to_string() }

impl Default for LabyrinthConfig {
    fn default() -> Self {
        Self {
            max_coordinate: default_max_coordinate(),
            teseo_x: 0.0,
            teseo_y: 0.0,
        }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            door_cost_multiplier: default_door_cost_multiplier(),
            max_expansions: 0,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            report_path: String::new(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
            show_path: default_show_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labyrinth: LabyrinthConfig::default(),
            search: SearchSection::default(),
            batch: BatchConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Where a loaded configuration came from
#[derive(Debug)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// No file at the path
    Defaults(PathBuf),
    /// The file exists but could not be read or parsed
    Fallback(PathBuf, LabyrinthError),
}

impl ConfigOrigin {
    /// Report the outcome; call once logging is initialised
    pub fn log(&self) {
        match self {
            ConfigOrigin::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigOrigin::Defaults(path) => {
                info!("No {} found, using default configuration", path.display())
            }
            ConfigOrigin::Fallback(path, e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                warn!("Using default configuration");
            }
        }
    }
}

impl Config {
    /// Load config.toml from the working directory, or use defaults
    pub fn load() -> Self {
        let (config, origin) = Self::load_or_default(DEFAULT_CONFIG_PATH);
        origin.log();
        config
    }

    /// Like `load`, but the caller logs the origin
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigOrigin) {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return (Config::default(), ConfigOrigin::Defaults(path));
        }
        match Config::load_from(&path) {
            Ok(config) => (config, ConfigOrigin::File(path)),
            Err(e) => (Config::default(), ConfigOrigin::Fallback(path, e)),
        }
    }

    /// Load from an explicit path; missing or malformed files are errors
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, LabyrinthError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, LabyrinthError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn teseo(&self) -> Point {
        Point::new(self.labyrinth.teseo_x, self.labyrinth.teseo_y)
    }

    pub fn to_search_config(&self) -> SearchConfig {
        SearchConfig {
            door_cost_multiplier: self.search.door_cost_multiplier,
            max_expansions: self.search.max_expansions,
        }
    }

    /// Report destination, if one is configured
    pub fn report_path(&self) -> Option<&str> {
        if self.batch.report_path.is_empty() {
            None
        } else {
            Some(&self.batch.report_path)
        }
    }
}
