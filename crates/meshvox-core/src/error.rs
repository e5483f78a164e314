//! Error types for meshvox.

use thiserror::Error;

/// The main error type for meshvox operations.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// The grid resolution is not three positive integers.
    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    /// The scene has no meshes, or its meshes have no vertices.
    #[error("scene contains no meshes with vertices")]
    EmptyScene,

    /// All vertices coincide, so no voxel edge length can be derived.
    #[error("bounding box has zero extent on every axis")]
    DegenerateBox,

    /// A vertex has an infinite or NaN coordinate.
    #[error("vertex {vertex} of mesh {mesh} has a non-finite coordinate")]
    NonFiniteVertex { mesh: usize, vertex: usize },

    /// The proximity factor is negative or not finite.
    #[error("invalid proximity factor {0}: must be finite and non-negative")]
    InvalidProximity(f32),

    /// A nearest-neighbor query was issued against an index with no points.
    #[error("spatial index was built over zero points")]
    EmptyIndex,

    /// Grid access outside of `[0, dim)` on some axis.
    #[error("voxel index {index:?} out of range for grid of size {dims:?}")]
    IndexOutOfRange { index: [usize; 3], dims: [usize; 3] },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A model file could not be parsed into a scene.
    #[error("failed to load mesh: {0}")]
    MeshLoad(String),

    /// The model file extension is not a supported format.
    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    /// An NPY artifact could not be decoded.
    #[error("malformed NPY data: {0}")]
    Npy(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshvox operations.
pub type Result<T> = std::result::Result<T, VoxelError>;
