//! Read-only scene model consumed by the voxelizer.

use glam::Vec3;

/// A triangle mesh: vertex positions plus triangle connectivity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in world space.
    pub vertices: Vec<Vec3>,
    /// Triangles as triples of indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from vertices and triangles.
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
        }
    }

    /// Creates a mesh with no connectivity, i.e. a plain point set.
    pub fn from_vertices(vertices: Vec<Vec3>) -> Self {
        Self::new(vertices, Vec::new())
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[must_use]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// An ordered collection of meshes loaded from one model file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub meshes: Vec<Mesh>,
}

impl Scene {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// Returns the number of meshes.
    #[must_use]
    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Returns the total vertex count over all meshes.
    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.meshes.iter().map(Mesh::num_vertices).sum()
    }

    /// Appends a mesh to the scene.
    pub fn push(&mut self, mesh: Mesh) -> &mut Self {
        self.meshes.push(mesh);
        self
    }
}

impl From<Vec<Mesh>> for Scene {
    fn from(meshes: Vec<Mesh>) -> Self {
        Self::new(meshes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_counts() {
        let mut scene = Scene::default();
        scene.push(Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        ));
        scene.push(Mesh::from_vertices(vec![Vec3::Z]));

        assert_eq!(scene.num_meshes(), 2);
        assert_eq!(scene.num_vertices(), 4);
        assert_eq!(scene.meshes[0].num_triangles(), 1);
        assert!(scene.meshes[1].triangles.is_empty());
    }
}
