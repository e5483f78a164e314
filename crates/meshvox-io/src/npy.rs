//! NPY (NumPy array file) encoding of voxel grids.
//!
//! Grids are written as format version 1.0 with dtype `<f4`, C order and
//! shape `(width, height, depth)`, which `numpy.load` reads back directly.

use std::io::{Read, Write};

use meshvox_core::{GridLayout, GridResolution, Result, VoxelError, VoxelGrid};

const MAGIC: &[u8; 6] = b"\x93NUMPY";
const VERSION: [u8; 2] = [1, 0];
const HEADER_ALIGN: usize = 64;

/// Builds the padded header dictionary for a `<f4` array of the given shape.
fn header(shape: [usize; 3]) -> String {
    let [w, h, d] = shape;
    let mut header =
        format!("{{'descr': '<f4', 'fortran_order': False, 'shape': ({w}, {h}, {d}), }}");
    // magic + version + u16 length + header + trailing newline
    let unpadded = MAGIC.len() + VERSION.len() + 2 + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.extend(std::iter::repeat(' ').take(padding));
    header.push('\n');
    header
}

/// Writes `grid` as an NPY array of shape `(width, height, depth)`.
pub fn write_npy<W: Write>(writer: &mut W, grid: &VoxelGrid) -> Result<()> {
    let header = header(grid.dims());
    let header_len = u16::try_from(header.len())
        .map_err(|_| VoxelError::Npy(format!("header too long: {} bytes", header.len())))?;

    writer.write_all(MAGIC)?;
    writer.write_all(&VERSION)?;
    writer.write_all(&header_len.to_le_bytes())?;
    writer.write_all(header.as_bytes())?;

    if cfg!(target_endian = "little") {
        writer.write_all(bytemuck::cast_slice(grid.as_flat()))?;
    } else {
        for value in grid.as_flat() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Reads a 3D `<f4` C-order NPY array, as produced by [`write_npy`].
///
/// NPY carries no voxel layout, so the caller supplies it.
pub fn read_npy<R: Read>(reader: &mut R, layout: GridLayout) -> Result<VoxelGrid> {
    let mut preamble = [0u8; 10];
    reader.read_exact(&mut preamble)?;
    if &preamble[..6] != MAGIC {
        return Err(VoxelError::Npy("missing magic string".to_string()));
    }
    if preamble[6] != 1 {
        return Err(VoxelError::Npy(format!(
            "unsupported format version {}.{}",
            preamble[6], preamble[7]
        )));
    }

    let header_len = usize::from(u16::from_le_bytes([preamble[8], preamble[9]]));
    let mut header = vec![0u8; header_len];
    reader.read_exact(&mut header)?;
    let header = String::from_utf8(header)
        .map_err(|_| VoxelError::Npy("header is not valid text".to_string()))?;

    if !header.contains("'descr': '<f4'") {
        return Err(VoxelError::Npy(format!("unsupported dtype in header {header:?}")));
    }
    if !header.contains("'fortran_order': False") {
        return Err(VoxelError::Npy("fortran order is not supported".to_string()));
    }
    let resolution = GridResolution::try_from(parse_shape(&header)?.as_slice())?;

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let expected = resolution.num_cells() * 4;
    if bytes.len() != expected {
        return Err(VoxelError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let data = bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    VoxelGrid::from_flat(resolution, layout, data)
}

fn parse_shape(header: &str) -> Result<Vec<usize>> {
    let malformed = || VoxelError::Npy(format!("malformed shape in header {header:?}"));
    let start = header.find("'shape': (").ok_or_else(malformed)? + "'shape': (".len();
    let len = header[start..].find(')').ok_or_else(malformed)?;

    header[start..start + len]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().map_err(|_| malformed()))
        .collect()
}
