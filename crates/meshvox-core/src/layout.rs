//! Grid resolution and the world-space layout of a voxel lattice.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::error::{Result, VoxelError};

/// Requested voxel counts along x, y and z. All components are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[usize; 3]", into = "[usize; 3]")]
pub struct GridResolution {
    width: usize,
    height: usize,
    depth: usize,
}

impl GridResolution {
    /// Creates a resolution, rejecting zero components.
    ///
    /// # Errors
    ///
    /// Returns [`VoxelError::InvalidResolution`] if any component is zero or
    /// the total cell count does not fit in `usize`.
    pub fn new(width: usize, height: usize, depth: usize) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(VoxelError::InvalidResolution(format!(
                "all components must be positive, got ({width}, {height}, {depth})"
            )));
        }
        if width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(depth))
            .is_none()
        {
            return Err(VoxelError::InvalidResolution(format!(
                "({width}, {height}, {depth}) has too many cells"
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Creates a resolution with the same count on every axis.
    pub fn uniform(dim: usize) -> Result<Self> {
        Self::new(dim, dim, dim)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns `[width, height, depth]`.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    /// Returns the total number of cells. Never overflows, see [`Self::new`].
    #[must_use]
    pub fn num_cells(&self) -> usize {
        self.width * self.height * self.depth
    }

    fn as_vec3(self) -> Vec3 {
        Vec3::new(self.width as f32, self.height as f32, self.depth as f32)
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        Self {
            width: 192,
            height: 192,
            depth: 200,
        }
    }
}

impl TryFrom<[usize; 3]> for GridResolution {
    type Error = VoxelError;

    fn try_from([w, h, d]: [usize; 3]) -> Result<Self> {
        Self::new(w, h, d)
    }
}

impl TryFrom<&[usize]> for GridResolution {
    type Error = VoxelError;

    fn try_from(values: &[usize]) -> Result<Self> {
        match *values {
            [w, h, d] => Self::new(w, h, d),
            _ => Err(VoxelError::InvalidResolution(format!(
                "expected exactly three integers, got {}",
                values.len()
            ))),
        }
    }
}

impl From<GridResolution> for [usize; 3] {
    fn from(res: GridResolution) -> Self {
        res.dims()
    }
}

/// World-space placement of a voxel lattice.
///
/// Voxels are cubes of side `edge`; `start` is the center of the voxel at
/// index (0, 0, 0). The center of voxel (i, j, k) is `start + (i, j, k) * edge`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub edge: f32,
    pub start: Vec3,
}

impl GridLayout {
    /// Returns the world-space center of voxel (i, j, k).
    #[must_use]
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> Vec3 {
        self.start + Vec3::new(i as f32, j as f32, k as f32) * self.edge
    }
}

/// Plans a cubic voxel lattice covering `bbox` at the given resolution.
///
/// The edge length is the largest per-axis candidate `extent / resolution`, so
/// the longest axis is covered exactly and the others with margin. The lattice
/// is centered on the box using floor division of the resolution, so an odd
/// resolution leaves one more cell on the positive side.
///
/// # Errors
///
/// Returns [`VoxelError::DegenerateBox`] if the box has zero extent on every axis.
pub fn plan_layout(bbox: &BoundingBox, resolution: GridResolution) -> Result<GridLayout> {
    if bbox.is_point() {
        return Err(VoxelError::DegenerateBox);
    }

    let edges = bbox.extents() / resolution.as_vec3();
    let edge = edges.max_element();
    log::info!(
        "voxel edge candidates: x={} y={} z={}, edge={edge}",
        edges.x,
        edges.y,
        edges.z
    );

    let half = Vec3::new(
        (resolution.width / 2) as f32,
        (resolution.height / 2) as f32,
        (resolution.depth / 2) as f32,
    );
    let start = bbox.center() - half * edge;
    log::info!("grid start (center of voxel 0,0,0): {start}");

    Ok(GridLayout { edge, start })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_resolution() {
        assert!(matches!(
            GridResolution::new(0, 1, 1),
            Err(VoxelError::InvalidResolution(_))
        ));
        assert!(matches!(
            GridResolution::try_from(&[4usize, 4][..]),
            Err(VoxelError::InvalidResolution(_))
        ));
        assert!(matches!(
            GridResolution::try_from(&[4usize, 4, 4, 4][..]),
            Err(VoxelError::InvalidResolution(_))
        ));
        assert_eq!(
            GridResolution::try_from(&[1usize, 2, 3][..]).unwrap().dims(),
            [1, 2, 3]
        );
    }

    #[test]
    fn test_cell_count_overflow_rejected() {
        let huge = 1usize << (usize::BITS / 2);
        assert!(matches!(
            GridResolution::new(huge, huge, huge),
            Err(VoxelError::InvalidResolution(_))
        ));
        assert!(matches!(
            GridResolution::try_from([usize::MAX, 2, 1]),
            Err(VoxelError::InvalidResolution(_))
        ));
        assert!(serde_json::from_str::<GridResolution>(&format!("[{huge}, {huge}, 2]")).is_err());
        assert_eq!(GridResolution::new(usize::MAX, 1, 1).unwrap().num_cells(), usize::MAX);
    }

    #[test]
    fn test_default_resolution() {
        let res = GridResolution::default();
        assert_eq!(res.dims(), [192, 192, 200]);
        assert_eq!(res.num_cells(), 192 * 192 * 200);
    }

    #[test]
    fn test_resolution_serde() {
        let res: GridResolution = serde_json::from_str("[2, 3, 4]").unwrap();
        assert_eq!(res.dims(), [2, 3, 4]);
        assert_eq!(serde_json::to_string(&res).unwrap(), "[2,3,4]");
        assert!(serde_json::from_str::<GridResolution>("[2, 0, 4]").is_err());
    }

    #[test]
    fn test_triangle_layout() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0));
        let layout = plan_layout(&bbox, GridResolution::uniform(2).unwrap()).unwrap();
        assert_eq!(layout.edge, 5.0);
        assert_eq!(layout.start, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(layout.cell_center(1, 1, 1), Vec3::new(5.0, 5.0, 0.0));
    }

    #[test]
    fn test_edge_uses_longest_axis() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::new(4.0, 8.0, 1.0));
        let layout = plan_layout(&bbox, GridResolution::new(4, 4, 4).unwrap()).unwrap();
        assert_eq!(layout.edge, 2.0);
        // center (2, 4, 0.5) minus 2 cells of 2.0 on every axis
        assert_eq!(layout.start, Vec3::new(-2.0, 0.0, -3.5));
    }

    #[test]
    fn test_odd_resolution_offset() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::splat(3.0));
        let layout = plan_layout(&bbox, GridResolution::uniform(3).unwrap()).unwrap();
        assert_eq!(layout.edge, 1.0);
        // floor(3 / 2) = 1 cell below the center
        assert_eq!(layout.start, Vec3::splat(0.5));
        assert_eq!(layout.cell_center(2, 2, 2), Vec3::splat(2.5));
    }

    #[test]
    fn test_degenerate_box() {
        let bbox = BoundingBox::new(Vec3::ONE, Vec3::ONE);
        assert!(matches!(
            plan_layout(&bbox, GridResolution::default()),
            Err(VoxelError::DegenerateBox)
        ));
    }

    #[test]
    fn test_flat_box_has_positive_edge() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0e-3));
        let layout = plan_layout(&bbox, GridResolution::default()).unwrap();
        assert!(layout.edge > 0.0);
    }
}
