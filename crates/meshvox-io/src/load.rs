//! Scene import from model files.
//!
//! Supported formats:
//! - Stanford PLY (`.ply`, ascii or binary) - one mesh per file
//! - Wavefront OBJ (`.obj`) - one mesh per object/group

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use glam::Vec3;
use meshvox_core::{Mesh, Result, Scene, VoxelError};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};

/// Loads a scene from a model file, picking the format from its extension.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let scene = match extension.as_str() {
        "ply" => {
            let mut reader = BufReader::new(File::open(path)?);
            load_ply(&mut reader)?
        }
        "obj" => load_obj_file(path)?,
        _ => {
            return Err(VoxelError::UnsupportedFormat(format!(
                "'{}' (expected .ply or .obj)",
                path.display()
            )))
        }
    };

    log::info!(
        "loaded '{}': {} meshes, {} vertices",
        path.display(),
        scene.num_meshes(),
        scene.num_vertices()
    );
    Ok(scene)
}

/// Reads a PLY stream into a single-mesh scene.
///
/// Vertices come from the `x`, `y`, `z` properties of the `vertex` element.
/// Polygons in the `face` element are fan-triangulated.
pub fn load_ply<R: Read>(reader: &mut R) -> Result<Scene> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| VoxelError::MeshLoad(format!("PLY parse error: {e}")))?;

    let vertices = ply
        .payload
        .get("vertex")
        .map(|elements| {
            elements
                .iter()
                .enumerate()
                .map(|(n, element)| ply_vertex(n, element))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let mut triangles = Vec::new();
    if let Some(faces) = ply.payload.get("face") {
        for face in faces {
            let indices = face
                .get("vertex_indices")
                .or_else(|| face.get("vertex_index"))
                .and_then(property_as_indices)
                .ok_or_else(|| {
                    VoxelError::MeshLoad("PLY face without vertex index list".to_string())
                })?;
            fan_triangulate(&indices, &mut triangles);
        }
    }

    Ok(Scene::new(vec![Mesh::new(vertices, triangles)]))
}

/// Loads an OBJ file, producing one mesh per model.
pub fn load_obj_file(path: &Path) -> Result<Scene> {
    let (models, _materials) = tobj::load_obj(path, &obj_load_options())
        .map_err(|e| VoxelError::MeshLoad(format!("OBJ load error: {e}")))?;
    Ok(scene_from_models(models))
}

/// Reads an OBJ stream, producing one mesh per model. Material libraries are ignored.
pub fn load_obj<R: BufRead>(reader: &mut R) -> Result<Scene> {
    let (models, _materials) = tobj::load_obj_buf(reader, &obj_load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| VoxelError::MeshLoad(format!("OBJ load error: {e}")))?;
    Ok(scene_from_models(models))
}

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

fn scene_from_models(models: Vec<tobj::Model>) -> Scene {
    models
        .into_iter()
        .map(|model| {
            let vertices = model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]))
                .collect();
            let triangles = model
                .mesh
                .indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect();
            Mesh::new(vertices, triangles)
        })
        .collect::<Vec<_>>()
        .into()
}

fn ply_vertex(n: usize, element: &DefaultElement) -> Result<Vec3> {
    let coord = |name: &str| {
        let value = element
            .get(name)
            .and_then(property_as_f32)
            .ok_or_else(|| VoxelError::MeshLoad(format!("PLY vertex {n} missing '{name}'")))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(VoxelError::MeshLoad(format!(
                "PLY vertex {n} has non-finite or out-of-range '{name}'"
            )))
        }
    };
    Ok(Vec3::new(coord("x")?, coord("y")?, coord("z")?))
}

// A double outside the f32 range narrows to an infinity, which the caller rejects.
#[allow(clippy::cast_possible_truncation)]
fn property_as_f32(property: &Property) -> Option<f32> {
    match *property {
        Property::Float(v) => Some(v),
        Property::Double(v) => Some(v as f32),
        Property::Char(v) => Some(f32::from(v)),
        Property::UChar(v) => Some(f32::from(v)),
        Property::Short(v) => Some(f32::from(v)),
        Property::UShort(v) => Some(f32::from(v)),
        Property::Int(v) => Some(v as f32),
        Property::UInt(v) => Some(v as f32),
        _ => None,
    }
}

fn property_as_indices(property: &Property) -> Option<Vec<u32>> {
    match property {
        Property::ListInt(v) => v.iter().map(|i| u32::try_from(*i).ok()).collect(),
        Property::ListUInt(v) => Some(v.clone()),
        Property::ListShort(v) => v.iter().map(|i| u32::try_from(*i).ok()).collect(),
        Property::ListUShort(v) => Some(v.iter().map(|i| u32::from(*i)).collect()),
        Property::ListChar(v) => v.iter().map(|i| u32::try_from(*i).ok()).collect(),
        Property::ListUChar(v) => Some(v.iter().map(|i| u32::from(*i)).collect()),
        _ => None,
    }
}

/// For a polygon [v0, v1, v2, v3, ...] emits [v0, v1, v2], [v0, v2, v3], ...
fn fan_triangulate(face: &[u32], triangles: &mut Vec<[u32; 3]>) {
    if let Some((&v0, rest)) = face.split_first() {
        for pair in rest.windows(2) {
            triangles.push([v0, pair[0], pair[1]]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CUBE_CORNER_PLY: &str = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0 0 0
1 0 0
1 1 0
0 1 2.5
4 0 1 2 3
";

    #[test]
    fn test_load_ascii_ply() {
        let mut reader = Cursor::new(CUBE_CORNER_PLY.as_bytes());
        let scene = load_ply(&mut reader).unwrap();

        assert_eq!(scene.num_meshes(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.vertices[3], Vec3::new(0.0, 1.0, 2.5));
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_load_ply_without_faces() {
        let text = "ply
format ascii 1.0
element vertex 2
property double x
property double y
property double z
end_header
-1 0 0
1 0 0
";
        let scene = load_ply(&mut Cursor::new(text.as_bytes())).unwrap();
        assert_eq!(scene.meshes[0].vertices, vec![Vec3::NEG_X, Vec3::X]);
        assert!(scene.meshes[0].triangles.is_empty());
    }

    #[test]
    fn test_load_malformed_ply() {
        let mut reader = Cursor::new(b"not a ply file".as_slice());
        assert!(matches!(load_ply(&mut reader), Err(VoxelError::MeshLoad(_))));
    }

    #[test]
    fn test_load_ply_non_finite_vertex() {
        let header = "ply\nformat ascii 1.0\nelement vertex 2\nproperty double x\nproperty double y\nproperty double z\nend_header\n0 0 0\n";
        let text = format!("{header}1e300 0 0\n");
        let result = load_ply(&mut Cursor::new(text.as_bytes()));
        assert!(
            matches!(&result, Err(VoxelError::MeshLoad(msg)) if msg.contains("vertex 1 has non-finite")),
            "{result:?}"
        );

        for bad in ["0 inf 0", "0 0 nan"] {
            let text = format!("{header}{bad}\n");
            let result = load_ply(&mut Cursor::new(text.as_bytes()));
            assert!(matches!(result, Err(VoxelError::MeshLoad(_))), "{bad}: {result:?}");
        }
    }

    #[test]
    fn test_load_obj_groups() {
        let text = "o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 5
v 1 0 5
v 1 1 5
v 0 1 5
f 4 5 6 7
";
        let scene = load_obj(&mut Cursor::new(text.as_bytes())).unwrap();
        assert_eq!(scene.num_meshes(), 2);
        assert_eq!(scene.meshes[0].num_vertices(), 3);
        assert_eq!(scene.meshes[0].num_triangles(), 1);
        assert_eq!(scene.meshes[1].num_vertices(), 4);
        assert_eq!(scene.meshes[1].num_triangles(), 2);
        assert!(scene.meshes[1].vertices.iter().all(|v| v.z == 5.0));
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            load_scene("model.stl"),
            Err(VoxelError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_fan_triangulate() {
        let mut triangles = Vec::new();
        fan_triangulate(&[4, 5, 6, 7, 8], &mut triangles);
        assert_eq!(triangles, vec![[4, 5, 6], [4, 6, 7], [4, 7, 8]]);

        triangles.clear();
        fan_triangulate(&[1, 2], &mut triangles);
        assert!(triangles.is_empty());
    }
}
