//! Dense voxel occupancy grid.

use glam::Vec3;

use crate::error::{Result, VoxelError};
use crate::layout::{GridLayout, GridResolution};

/// Value stored in an occupied voxel.
pub const OCCUPIED: f32 = 1.0;

/// Value stored in an empty voxel.
pub const EMPTY: f32 = 0.0;

/// A dense `width x height x depth` grid of single-precision occupancy values.
///
/// Cells are stored in C order: cell (i, j, k) lives at linear index
/// `(i * height + j) * depth + k`, the order `numpy.reshape(-1)` produces for
/// an array of shape `(width, height, depth)`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    resolution: GridResolution,
    layout: GridLayout,
    data: Vec<f32>,
}

impl VoxelGrid {
    /// Creates a grid with every cell empty.
    pub fn new(resolution: GridResolution, layout: GridLayout) -> Self {
        Self {
            resolution,
            layout,
            data: vec![EMPTY; resolution.num_cells()],
        }
    }

    /// Rebuilds a grid from values in the linear order of [`VoxelGrid::as_flat`].
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::SizeMismatch`] if `data` does not hold exactly one
    /// value per cell.
    pub fn from_flat(
        resolution: GridResolution,
        layout: GridLayout,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = resolution.num_cells();
        if data.len() != expected {
            return Err(VoxelError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            resolution,
            layout,
            data,
        })
    }

    #[must_use]
    pub fn resolution(&self) -> GridResolution {
        self.resolution
    }

    #[must_use]
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Returns `[width, height, depth]`.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.resolution.dims()
    }

    /// Returns the total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: a resolution has positive components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flattens a 3D cell index to a linear index.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::IndexOutOfRange`] if any component is outside the grid.
    pub fn flatten_index(&self, i: usize, j: usize, k: usize) -> Result<usize> {
        let [w, h, d] = self.dims();
        if i >= w || j >= h || k >= d {
            return Err(VoxelError::IndexOutOfRange {
                index: [i, j, k],
                dims: [w, h, d],
            });
        }
        Ok((i * h + j) * d + k)
    }

    /// Unflattens a linear index to a 3D cell index.
    #[must_use]
    pub fn unflatten_index(&self, idx: usize) -> [usize; 3] {
        let [_, h, d] = self.dims();
        [idx / (h * d), (idx / d) % h, idx % d]
    }

    /// Returns the value of cell (i, j, k).
    pub fn get(&self, i: usize, j: usize, k: usize) -> Result<f32> {
        let idx = self.flatten_index(i, j, k)?;
        Ok(self.data[idx])
    }

    /// Sets the value of cell (i, j, k).
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f32) -> Result<()> {
        let idx = self.flatten_index(i, j, k)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Returns true if cell (i, j, k) is marked occupied.
    pub fn is_occupied(&self, i: usize, j: usize, k: usize) -> Result<bool> {
        Ok(self.get(i, j, k)? != EMPTY)
    }

    /// Returns the world-space center of cell (i, j, k).
    #[must_use]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Vec3 {
        self.layout.cell_center(i, j, k)
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|v| **v != EMPTY).count()
    }

    /// Returns the cell values in linear (C) order.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Returns a copy of the cell values in linear (C) order.
    #[must_use]
    pub fn to_flat_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize, d: usize) -> VoxelGrid {
        let layout = GridLayout {
            edge: 1.0,
            start: Vec3::ZERO,
        };
        VoxelGrid::new(GridResolution::new(w, h, d).unwrap(), layout)
    }

    #[test]
    fn test_grid_creation() {
        let grid = grid(4, 5, 6);
        assert_eq!(grid.dims(), [4, 5, 6]);
        assert_eq!(grid.len(), 120);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.as_flat().iter().all(|v| *v == EMPTY));
    }

    #[test]
    fn test_get_set() {
        let mut grid = grid(2, 3, 4);
        grid.set(1, 2, 3, OCCUPIED).unwrap();
        assert_eq!(grid.get(1, 2, 3).unwrap(), OCCUPIED);
        assert!(grid.is_occupied(1, 2, 3).unwrap());
        assert!(!grid.is_occupied(0, 2, 3).unwrap());
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = grid(2, 3, 4);
        assert!(matches!(
            grid.get(2, 0, 0),
            Err(VoxelError::IndexOutOfRange { index: [2, 0, 0], dims: [2, 3, 4] })
        ));
        assert!(grid.get(0, 3, 0).is_err());
        assert!(grid.set(0, 0, 4, OCCUPIED).is_err());
    }

    #[test]
    fn test_index_order() {
        let grid = grid(5, 6, 7);
        // depth varies fastest, width slowest
        assert_eq!(grid.flatten_index(0, 0, 1).unwrap(), 1);
        assert_eq!(grid.flatten_index(0, 1, 0).unwrap(), 7);
        assert_eq!(grid.flatten_index(1, 0, 0).unwrap(), 42);

        let idx = grid.flatten_index(2, 3, 4).unwrap();
        assert_eq!(grid.unflatten_index(idx), [2, 3, 4]);
    }

    #[test]
    fn test_flat_round_trip() {
        let mut original = grid(3, 4, 5);
        for (n, (i, j, k)) in [(0, 0, 0), (2, 3, 4), (1, 0, 3), (2, 1, 0)].into_iter().enumerate() {
            original.set(i, j, k, n as f32 + 1.0).unwrap();
        }

        let flat = original.to_flat_vec();
        let rebuilt =
            VoxelGrid::from_flat(original.resolution(), original.layout(), flat).unwrap();
        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.get(2, 3, 4).unwrap(), 2.0);
    }

    #[test]
    fn test_from_flat_size_mismatch() {
        let res = GridResolution::new(2, 2, 2).unwrap();
        let layout = GridLayout {
            edge: 1.0,
            start: Vec3::ZERO,
        };
        assert!(matches!(
            VoxelGrid::from_flat(res, layout, vec![0.0; 7]),
            Err(VoxelError::SizeMismatch { expected: 8, actual: 7 })
        ));
    }
}
