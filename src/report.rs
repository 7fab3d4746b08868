use crate::error::LabyrinthError;
use crate::grid::CellCoord;
use crate::pathfinding::Solution;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Results of solving every map in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub max_coordinate: u32,
    pub maps: Vec<MapReport>,
}

/// Result for one map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReport {
    /// Position of the map in the input file, starting at 0
    pub index: usize,
    pub reachable: bool,
    pub doors_used: u32,
    pub path_len: usize,
    /// Cells from Teseo to the Minotaur
    pub path: Vec<CellCoord>,
    /// Why the map could not be solved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MapReport {
    pub fn from_solution(index: usize, solution: &Solution) -> Self {
        MapReport {
            index,
            reachable: solution.reachable,
            doors_used: solution.doors_used,
            path_len: solution.path.len(),
            path: solution.path.clone(),
            error: None,
        }
    }

    pub fn from_error(index: usize, error: &LabyrinthError) -> Self {
        MapReport {
            index,
            reachable: false,
            doors_used: 0,
            path_len: 0,
            path: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

impl BatchReport {
    pub fn new(max_coordinate: u32) -> Self {
        BatchReport {
            max_coordinate,
            maps: Vec::new(),
        }
    }

    pub fn push(&mut self, index: usize, solution: &Solution) {
        self.maps.push(MapReport::from_solution(index, solution));
    }

    pub fn push_error(&mut self, index: usize, error: &LabyrinthError) {
        self.maps.push(MapReport::from_error(index, error));
    }

    /// Maps that could not be solved
    pub fn failures(&self) -> usize {
        self.maps.iter().filter(|m| m.error.is_some()).count()
    }

    /// Save to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), LabyrinthError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LabyrinthError> {
        let json = fs::read_to_string(path)?;
        let report: BatchReport = serde_json::from_str(&json)?;
        Ok(report)
    }
}
