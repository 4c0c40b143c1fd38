//! Triangle mesh polygon soup

use detvis_core::{OrientedBox3, Point3f};
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices, faces, and optional vertex colors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub colors: Option<Vec<[u8; 3]>>,
}

// Two triangles per cube face, vertices in BOX_EDGES corner order.
const CUBOID_FACES: [[usize; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            colors: None,
        }
    }

    /// Build the solid cuboid mesh of an oriented box
    pub fn from_box(bbox: &OrientedBox3) -> Self {
        Self::from_vertices_and_faces(bbox.corners().to_vec(), CUBOID_FACES.to_vec())
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Append another mesh, offsetting its face indices
    pub fn append(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| [f[0] + base, f[1] + base, f[2] + base]));
        if let (Some(mine), Some(theirs)) = (self.colors.as_mut(), other.colors.as_ref()) {
            mine.extend_from_slice(theirs);
        } else {
            self.colors = None;
        }
    }

    /// Concatenate a list of meshes into one polygon soup
    pub fn concatenate(meshes: &[TriangleMesh]) -> TriangleMesh {
        let mut soup = TriangleMesh::new();
        soup.colors = Some(Vec::new());
        for mesh in meshes {
            soup.append(mesh);
        }
        soup
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
