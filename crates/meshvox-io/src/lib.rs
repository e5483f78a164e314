//! Model import and grid export for meshvox.
//!
//! - [`load_scene`] reads PLY or OBJ files into a [`meshvox_core::Scene`]
//! - [`write_npy`] / [`write_json`] encode a [`meshvox_core::VoxelGrid`]
//! - [`write_artifacts`] writes both encodings so that either both or neither exist

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod export;
pub mod json;
pub mod load;
pub mod npy;

pub use export::{write_artifacts, ArtifactPaths};
pub use json::{read_json, write_json};
pub use load::{load_obj, load_obj_file, load_ply, load_scene};
pub use npy::{read_npy, write_npy};
