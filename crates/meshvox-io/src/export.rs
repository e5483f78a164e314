//! Writing both voxel artifacts (NPY + JSON) as one unit.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use meshvox_core::{Options, Result, VoxelGrid};

use crate::json::write_json;
use crate::npy::write_npy;

/// Destination files for one voxelized model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub json: PathBuf,
    pub numpy: PathBuf,
}

impl ArtifactPaths {
    /// Resolves output files for `model_path` from the configured destinations.
    ///
    /// A destination that already ends in the artifact extension is used as is;
    /// otherwise it is a directory and the file is named after the model stem,
    /// e.g. `bunny.ply` -> `<json dir>/bunny.json` and `<numpy dir>/bunny.npy`.
    pub fn resolve(options: &Options, model_path: &Path) -> Self {
        let stem = model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("voxels");
        Self {
            json: target(&options.output_json_path, stem, "json"),
            numpy: target(&options.output_numpy_path, stem, "npy"),
        }
    }
}

fn target(destination: &Path, stem: &str, extension: &str) -> PathBuf {
    if destination.extension().is_some_and(|e| e == extension) {
        destination.to_path_buf()
    } else {
        destination.join(format!("{stem}.{extension}"))
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer)
}

/// Writes `grid` to both artifact files, or to neither.
///
/// Each artifact is first written to a `.tmp` sibling and only renamed into
/// place once both have been written. On failure every file this call created
/// is removed.
pub fn write_artifacts(grid: &VoxelGrid, paths: &ArtifactPaths) -> Result<()> {
    let json_tmp = staging_path(&paths.json);
    let numpy_tmp = staging_path(&paths.numpy);

    let staged = write_file(&json_tmp, |w| write_json(w, grid))
        .and_then(|()| write_file(&numpy_tmp, |w| write_npy(w, grid)));
    if let Err(e) = staged {
        let _ = fs::remove_file(&json_tmp);
        let _ = fs::remove_file(&numpy_tmp);
        return Err(e);
    }

    if let Err(e) = fs::rename(&json_tmp, &paths.json) {
        let _ = fs::remove_file(&json_tmp);
        let _ = fs::remove_file(&numpy_tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&numpy_tmp, &paths.numpy) {
        let _ = fs::remove_file(&paths.json);
        let _ = fs::remove_file(&numpy_tmp);
        return Err(e.into());
    }

    log::info!(
        "wrote '{}' and '{}'",
        paths.json.display(),
        paths.numpy.display()
    );
    Ok(())
}
