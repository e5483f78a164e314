//! Vertex-proximity occupancy fill.
//!
//! A voxel is occupied when the mesh vertex nearest to its center lies within
//! `edge * proximity_factor` of that center. This approximates surface
//! occupancy without triangle/box intersection tests.

use rayon::prelude::*;

use crate::error::{Result, VoxelError};
use crate::grid::{VoxelGrid, EMPTY, OCCUPIED};
use crate::index::SpatialIndex;
use crate::layout::GridLayout;

/// Default proximity factor: a vertex within half a voxel marks the voxel.
pub const DEFAULT_PROXIMITY_FACTOR: f32 = 0.5;

/// Marks voxels whose center is close to an indexed vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyFiller {
    /// Threshold as a fraction of the voxel edge length.
    pub proximity_factor: f32,
    /// Process x-slabs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for OccupancyFiller {
    fn default() -> Self {
        Self {
            proximity_factor: DEFAULT_PROXIMITY_FACTOR,
            parallel: true,
        }
    }
}

impl OccupancyFiller {
    pub fn new(proximity_factor: f32, parallel: bool) -> Self {
        Self {
            proximity_factor,
            parallel,
        }
    }

    /// Checks that the proximity factor is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidProximity`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.proximity_factor.is_finite() && self.proximity_factor >= 0.0 {
            Ok(())
        } else {
            Err(VoxelError::InvalidProximity(self.proximity_factor))
        }
    }

    /// Returns the occupancy distance threshold for the given layout.
    #[must_use]
    pub fn threshold(&self, layout: &GridLayout) -> f32 {
        layout.edge * self.proximity_factor
    }

    /// Fills `grid` against one mesh's vertex index.
    ///
    /// Cells already occupied are left untouched, so calling this once per mesh
    /// yields the union of all meshes' occupancy. Returns the number of cells
    /// newly marked by this call.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidProximity`] for a negative or non-finite
    /// factor and [`VoxelError::EmptyIndex`] if `index` holds no points.
    pub fn fill<I: SpatialIndex>(&self, grid: &mut VoxelGrid, index: &I) -> Result<usize> {
        self.validate()?;
        if index.is_empty() {
            return Err(VoxelError::EmptyIndex);
        }

        let layout = grid.layout();
        let [_, height, depth] = grid.dims();
        let slab_len = height * depth;
        let threshold = self.threshold(&layout);

        let fill_slab = |(i, slab): (usize, &mut [f32])| -> Result<usize> {
            let mut marked = 0;
            for j in 0..height {
                for k in 0..depth {
                    let cell = &mut slab[j * depth + k];
                    if *cell != EMPTY {
                        continue;
                    }
                    let nearest = index.nearest(layout.cell_center(i, j, k))?;
                    if nearest.distance <= threshold {
                        *cell = OCCUPIED;
                        marked += 1;
                    }
                }
            }
            Ok(marked)
        };

        let data = grid.data_mut();
        if self.parallel {
            data.par_chunks_mut(slab_len)
                .enumerate()
                .map(fill_slab)
                .try_reduce(|| 0, |a, b| Ok(a + b))
        } else {
            data.chunks_mut(slab_len)
                .enumerate()
                .map(fill_slab)
                .sum()
        }
    }
}
