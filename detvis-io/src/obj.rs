//! OBJ format writers

use crate::mesh::TriangleMesh;
use detvis_core::{PointCloud, Result};
use std::io::Write;
use std::path::Path;

/// Write a point cloud as OBJ vertex lines (`v x y z [r g b]`)
///
/// Colors, when present, are written as 0-255 integers, the form MeshLab
/// picks up as per-vertex colors.
pub fn write_points_obj<P: AsRef<Path>>(cloud: &PointCloud, path: P) -> Result<()> {
    let mut file = create_with_parents(path.as_ref())?;
    for (i, p) in cloud.iter().enumerate() {
        match cloud.colors.as_ref().map(|c| c[i]) {
            Some(color) => writeln!(
                file,
                "v {} {} {} {} {} {}",
                p.x,
                p.y,
                p.z,
                (color[0] * 255.0).round() as u8,
                (color[1] * 255.0).round() as u8,
                (color[2] * 255.0).round() as u8,
            )?,
            None => writeln!(file, "v {} {} {}", p.x, p.y, p.z)?,
        }
    }
    Ok(())
}

/// Write a triangle mesh as OBJ (vertices plus 1-based face lines)
pub fn write_mesh_obj<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let mut file = create_with_parents(path.as_ref())?;
    for v in &mesh.vertices {
        writeln!(file, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for f in &mesh.faces {
        writeln!(file, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
    }
    Ok(())
}

pub(crate) fn create_with_parents(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(std::fs::File::create(path)?)
}
