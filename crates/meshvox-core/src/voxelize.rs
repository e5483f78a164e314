//! Scene-level voxelization driver.

use crate::bounds::compute_bounding_box;
use crate::error::Result;
use crate::fill::OccupancyFiller;
use crate::grid::VoxelGrid;
use crate::index::SpatialIndex;
use crate::layout::{plan_layout, GridResolution};
use crate::scene::Scene;

/// Voxelizes every mesh of `scene` into one grid of the given resolution.
///
/// The layout is planned from the bounding box of the whole scene. Each mesh
/// then gets its own index of type `I` and is filled into the shared grid, so
/// a cell is occupied if any mesh occupies it. Meshes without vertices are
/// skipped with a warning.
///
/// # Errors
///
/// Fails with [`crate::VoxelError::InvalidProximity`],
/// [`crate::VoxelError::EmptyScene`], [`crate::VoxelError::NonFiniteVertex`] or
/// [`crate::VoxelError::DegenerateBox`] before any grid is allocated.
pub fn voxelize_scene<I: SpatialIndex>(
    scene: &Scene,
    resolution: GridResolution,
    filler: &OccupancyFiller,
) -> Result<VoxelGrid> {
    filler.validate()?;
    let bbox = compute_bounding_box(scene)?;
    log::debug!("scene bounding box: {:?}", bbox.to_array());

    let layout = plan_layout(&bbox, resolution)?;
    let mut grid = VoxelGrid::new(resolution, layout);

    for (n, mesh) in scene.meshes.iter().enumerate() {
        if mesh.is_empty() {
            log::warn!("mesh {n} has no vertices, skipping");
            continue;
        }

        let index = I::build(&mesh.vertices);
        let marked = filler.fill(&mut grid, &index)?;
        log::debug!(
            "mesh {n}: {} vertices, {marked} voxels newly occupied",
            mesh.num_vertices()
        );
    }

    log::info!(
        "voxelized {} meshes: {} of {} voxels occupied",
        scene.num_meshes(),
        grid.occupied_count(),
        grid.len()
    );
    Ok(grid)
}
