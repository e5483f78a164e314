//! Nearest-vertex search structures.
//!
//! The voxelizer only needs "which vertex is closest to this point", so the
//! search backend sits behind the [`SpatialIndex`] trait:
//! - [`RTreeIndex`] - bulk-loaded R*-tree, used by default
//! - [`LinearIndex`] - brute-force scan with the same contract
//!
//! Both are immutable after construction and can be queried from many
//! threads at once.

use glam::Vec3;
use rstar::RTree;

use crate::error::{Result, VoxelError};

/// The closest indexed point to a query and its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub point: Vec3,
    pub distance: f32,
}

/// A static nearest-neighbor index over a point set.
pub trait SpatialIndex: Send + Sync {
    /// Builds the index. The point set cannot change afterwards.
    fn build(points: &[Vec3]) -> Self
    where
        Self: Sized;

    /// Finds the indexed point closest to `query`.
    ///
    /// Returns [`VoxelError::EmptyIndex`] if the index holds no points.
    fn nearest(&self, query: Vec3) -> Result<Nearest>;

    /// Returns the number of indexed points.
    fn len(&self) -> usize;

    /// Returns true if the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// R*-tree backed index.
pub struct RTreeIndex {
    tree: RTree<[f32; 3]>,
}

impl SpatialIndex for RTreeIndex {
    fn build(points: &[Vec3]) -> Self {
        let tree = RTree::bulk_load(points.iter().map(Vec3::to_array).collect());
        Self { tree }
    }

    fn nearest(&self, query: Vec3) -> Result<Nearest> {
        let point = self
            .tree
            .nearest_neighbor(&query.to_array())
            .map(|p| Vec3::from_array(*p))
            .ok_or(VoxelError::EmptyIndex)?;
        Ok(Nearest {
            point,
            distance: point.distance(query),
        })
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

/// Linear scan over all points. O(n) per query.
pub struct LinearIndex {
    points: Vec<Vec3>,
}

impl SpatialIndex for LinearIndex {
    fn build(points: &[Vec3]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    fn nearest(&self, query: Vec3) -> Result<Nearest> {
        let mut best: Option<(Vec3, f32)> = None;
        for p in &self.points {
            let d2 = p.distance_squared(query);
            if best.map_or(true, |(_, best_d2)| d2 < best_d2) {
                best = Some((*p, d2));
            }
        }

        let (point, d2) = best.ok_or(VoxelError::EmptyIndex)?;
        Ok(Nearest {
            point,
            distance: d2.sqrt(),
        })
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(3.0, 3.0, 3.0),
        ]
    }

    #[test]
    fn test_rtree_nearest() {
        let index = RTreeIndex::build(&sample_points());
        assert_eq!(index.len(), 4);

        let hit = index.nearest(Vec3::new(9.0, 1.0, 0.0)).unwrap();
        assert_eq!(hit.point, Vec3::new(10.0, 0.0, 0.0));
        assert!((hit.distance - 2.0_f32.sqrt()).abs() < 1e-6);

        let hit = index.nearest(Vec3::new(3.0, 3.0, 3.0)).unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn test_linear_nearest() {
        let index = LinearIndex::build(&sample_points());
        let hit = index.nearest(Vec3::new(-1.0, -1.0, 0.0)).unwrap();
        assert_eq!(hit.point, Vec3::ZERO);
        assert!((hit.distance - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_empty_index() {
        let rtree = RTreeIndex::build(&[]);
        assert!(rtree.is_empty());
        assert!(matches!(rtree.nearest(Vec3::ZERO), Err(VoxelError::EmptyIndex)));

        let linear = LinearIndex::build(&[]);
        assert!(linear.is_empty());
        assert!(matches!(linear.nearest(Vec3::ZERO), Err(VoxelError::EmptyIndex)));
    }

    fn arb_point() -> impl Strategy<Value = Vec3> {
        (-100.0f32..100.0, -100.0f32..100.0, -100.0f32..100.0)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_rtree_matches_linear_scan(
            points in prop::collection::vec(arb_point(), 1..200),
            queries in prop::collection::vec(arb_point(), 1..20),
        ) {
            let rtree = RTreeIndex::build(&points);
            let linear = LinearIndex::build(&points);
            for q in queries {
                let a = rtree.nearest(q).unwrap();
                let b = linear.nearest(q).unwrap();
                prop_assert!((a.distance - b.distance).abs() <= 1e-3 * b.distance.max(1.0));
            }
        }
    }
}
