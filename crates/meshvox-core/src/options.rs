//! Configuration options for a voxelization run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fill::{OccupancyFiller, DEFAULT_PROXIMITY_FACTOR};
use crate::layout::GridResolution;

/// Options controlling resolution, occupancy and export destinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Directory (or `.json` file path) for the flattened JSON export.
    pub output_json_path: PathBuf,

    /// Directory (or `.npy` file path) for the dense array export.
    pub output_numpy_path: PathBuf,

    /// Grid resolution as (width, height, depth).
    pub size: GridResolution,

    /// Occupancy threshold as a fraction of the voxel edge.
    pub proximity_factor: f32,

    /// Whether to fill the grid on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_json_path: PathBuf::from("../voxel_json/"),
            output_numpy_path: PathBuf::from("../voxel_numpy/"),
            size: GridResolution::default(),
            proximity_factor: DEFAULT_PROXIMITY_FACTOR,
            parallel: true,
        }
    }
}

impl Options {
    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Returns the occupancy filler configured by these options.
    #[must_use]
    pub fn filler(&self) -> OccupancyFiller {
        OccupancyFiller::new(self.proximity_factor, self.parallel)
    }
}
