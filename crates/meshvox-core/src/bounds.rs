//! Axis-aligned bounding boxes over scene vertices.

use glam::Vec3;
use rayon::prelude::*;

use crate::error::{Result, VoxelError};
use crate::scene::{Mesh, Scene};

/// The minimal axis-aligned box enclosing a set of vertices.
///
/// Invariant: `min <= max` component-wise. A single vertex yields a point box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Creates a box from its corners, normalizing so that `min <= max`.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Computes the tight box around `points`, or `None` if there are none.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(Self { min, max })
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Returns the per-axis extent `max - min`.
    #[must_use]
    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.max + self.min) / 2.0
    }

    /// Returns true if the box has zero extent on every axis.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.extents() == Vec3::ZERO
    }

    /// Returns true if `point` lies inside the box (boundary included).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Returns the six extrema as `(xmax, ymax, zmax, xmin, ymin, zmin)`.
    #[must_use]
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.max.x, self.max.y, self.max.z, self.min.x, self.min.y, self.min.z,
        ]
    }
}

impl Mesh {
    /// Returns the tight bounding box of this mesh, or `None` if it has no vertices.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.vertices)
    }
}

/// Computes the bounding box of every vertex of every mesh in `scene`.
///
/// Per-mesh boxes are computed in parallel and merged with [`BoundingBox::union`],
/// so mesh order does not affect the result. Meshes without vertices are ignored.
///
/// # Errors
///
/// Returns [`VoxelError::EmptyScene`] if the scene has no meshes or none of its
/// meshes has a vertex, and [`VoxelError::NonFiniteVertex`] if any coordinate
/// is infinite or NaN.
pub fn compute_bounding_box(scene: &Scene) -> Result<BoundingBox> {
    if scene.meshes.is_empty() {
        return Err(VoxelError::EmptyScene);
    }

    // glam's min/max skip NaN, so bad vertices must be caught before folding
    let non_finite = scene
        .meshes
        .par_iter()
        .enumerate()
        .find_map_first(|(mesh, m)| {
            m.vertices
                .iter()
                .position(|p| !p.is_finite())
                .map(|vertex| (mesh, vertex))
        });
    if let Some((mesh, vertex)) = non_finite {
        return Err(VoxelError::NonFiniteVertex { mesh, vertex });
    }

    scene
        .meshes
        .par_iter()
        .filter_map(Mesh::bounding_box)
        .reduce_with(|a, b| a.union(&b))
        .ok_or(VoxelError::EmptyScene)
}
