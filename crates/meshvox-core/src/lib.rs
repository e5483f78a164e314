//! Core types and algorithms for meshvox.
//!
//! This crate turns a [`Scene`] of triangle meshes into a dense [`VoxelGrid`]:
//! - [`compute_bounding_box`] finds the extent of all vertices
//! - [`plan_layout`] derives a cubic voxel edge and the lattice origin
//! - [`SpatialIndex`] answers nearest-vertex queries
//! - [`OccupancyFiller`] marks voxels whose center is near a vertex
//! - [`voxelize_scene`] ties the steps together

// Grid math converts between voxel indices and world coordinates.
#![allow(clippy::cast_precision_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Occupancy values are exact 0.0 / 1.0 markers.
#![allow(clippy::float_cmp)]

pub mod bounds;
pub mod error;
pub mod fill;
pub mod grid;
pub mod index;
pub mod layout;
pub mod options;
pub mod scene;
pub mod voxelize;

pub use bounds::{compute_bounding_box, BoundingBox};
pub use error::{Result, VoxelError};
pub use fill::{OccupancyFiller, DEFAULT_PROXIMITY_FACTOR};
pub use grid::{VoxelGrid, EMPTY, OCCUPIED};
pub use index::{LinearIndex, Nearest, RTreeIndex, SpatialIndex};
pub use layout::{plan_layout, GridLayout, GridResolution};
pub use options::Options;
pub use scene::{Mesh, Scene};
pub use voxelize::voxelize_scene;

// Re-export glam types for convenience
pub use glam::Vec3;
