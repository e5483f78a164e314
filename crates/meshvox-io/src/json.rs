//! JSON encoding of voxel grids as `{"array": [...]}`.

use std::io::{Read, Write};

use meshvox_core::{GridLayout, GridResolution, Result, VoxelGrid};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct FlatArrayRef<'a> {
    array: &'a [f32],
}

#[derive(Deserialize)]
struct FlatArray {
    array: Vec<f32>,
}

/// Writes the grid flattened in C order under the `array` key.
pub fn write_json<W: Write>(writer: &mut W, grid: &VoxelGrid) -> Result<()> {
    serde_json::to_writer(
        &mut *writer,
        &FlatArrayRef {
            array: grid.as_flat(),
        },
    )?;
    writer.flush()?;
    Ok(())
}

/// Reads a flattened grid and reshapes it to `resolution`.
pub fn read_json<R: Read>(
    reader: &mut R,
    resolution: GridResolution,
    layout: GridLayout,
) -> Result<VoxelGrid> {
    let flat: FlatArray = serde_json::from_reader(reader)?;
    VoxelGrid::from_flat(resolution, layout, flat.array)
}
