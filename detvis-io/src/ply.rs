//! ASCII PLY writer

use crate::mesh::TriangleMesh;
use crate::obj::create_with_parents;
use detvis_core::Result;
use std::io::Write;
use std::path::Path;

/// Write a triangle mesh as ASCII PLY
pub fn write_mesh_ply<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let mut file = create_with_parents(path.as_ref())?;
    let colors = mesh
        .colors
        .as_deref()
        .filter(|c| c.len() == mesh.vertex_count());

    writeln!(file, "ply")?;
    writeln!(file, "format ascii 1.0")?;
    writeln!(file, "element vertex {}", mesh.vertex_count())?;
    writeln!(file, "property float x")?;
    writeln!(file, "property float y")?;
    writeln!(file, "property float z")?;
    if colors.is_some() {
        writeln!(file, "property uchar red")?;
        writeln!(file, "property uchar green")?;
        writeln!(file, "property uchar blue")?;
    }
    writeln!(file, "element face {}", mesh.face_count())?;
    writeln!(file, "property list uchar int vertex_indices")?;
    writeln!(file, "end_header")?;

    for (i, v) in mesh.vertices.iter().enumerate() {
        match colors {
            Some(c) => {
                let c = c[i];
                writeln!(file, "{} {} {} {} {} {}", v.x, v.y, v.z, c[0], c[1], c[2])?
            }
            None => writeln!(file, "{} {} {}", v.x, v.y, v.z)?,
        }
    }
    for f in &mesh.faces {
        writeln!(file, "3 {} {} {}", f[0], f[1], f[2])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use detvis_core::Point3;

    #[test]
    fn ply_header_counts_match_body() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let path = std::env::temp_dir()
            .join("detvis_ply_tests")
            .join("tri.ply");
        write_mesh_ply(&mesh, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ply\nformat ascii 1.0\n"));
        assert!(text.contains("element vertex 3"));
        assert!(text.contains("element face 1"));
        assert!(text.trim_end().ends_with("3 0 1 2"));
        std::fs::remove_file(&path).unwrap();
    }
}
