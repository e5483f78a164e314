//! meshvox: convert triangle meshes into fixed-resolution voxel grids.
//!
//! A model file is loaded into a [`Scene`], its vertices are bounded, a cubic
//! voxel lattice of the requested resolution is centered on them, and every
//! voxel whose center lies within half a voxel of a mesh vertex is marked
//! occupied. The resulting [`VoxelGrid`] is exported as an NPY array and as a
//! flattened JSON array.
//!
//! # Quick Start
//!
//! ```no_run
//! use meshvox::*;
//!
//! fn main() -> Result<()> {
//!     let options = Options {
//!         size: GridResolution::new(64, 64, 64)?,
//!         ..Options::default()
//!     };
//!     let (grid, paths) = voxelize_file("bunny.ply", &options)?;
//!     println!("{} voxels occupied, written to {:?}", grid.occupied_count(), paths);
//!     Ok(())
//! }
//! ```

use std::path::Path;

pub use meshvox_core::{
    bounds::{compute_bounding_box, BoundingBox},
    error::{Result, VoxelError},
    fill::{OccupancyFiller, DEFAULT_PROXIMITY_FACTOR},
    grid::{VoxelGrid, EMPTY, OCCUPIED},
    index::{LinearIndex, Nearest, RTreeIndex, SpatialIndex},
    layout::{plan_layout, GridLayout, GridResolution},
    options::Options,
    scene::{Mesh, Scene},
    voxelize::voxelize_scene,
    Vec3,
};

pub use meshvox_io::{
    load_scene, read_json, read_npy, write_artifacts, write_json, write_npy, ArtifactPaths,
};

/// Voxelizes an in-memory scene with the R*-tree index.
pub fn voxelize(scene: &Scene, options: &Options) -> Result<VoxelGrid> {
    voxelize_scene::<RTreeIndex>(scene, options.size, &options.filler())
}

/// Loads a model, voxelizes it and writes both artifacts.
///
/// Nothing is written unless voxelization succeeds, and the two artifacts are
/// written together (see [`write_artifacts`]).
pub fn voxelize_file(
    model_path: impl AsRef<Path>,
    options: &Options,
) -> Result<(VoxelGrid, ArtifactPaths)> {
    let model_path = model_path.as_ref();
    let scene = load_scene(model_path)?;
    let grid = voxelize(&scene, options)?;

    let paths = ArtifactPaths::resolve(options, model_path);
    write_artifacts(&grid, &paths)?;
    Ok((grid, paths))
}
