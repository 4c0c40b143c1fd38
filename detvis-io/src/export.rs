//! Scene export: polygon soup and detection-result dumps

use crate::mesh::TriangleMesh;
use crate::obj::{write_mesh_obj, write_points_obj};
use crate::ply::write_mesh_ply;
use crate::MeshFormat;
use detvis_core::{OrientedBox3, Point3f, PointCloud, Result, Vector3};
use std::path::Path;

/// Convert oriented boxes into cuboid meshes
///
/// An empty box list yields a single degenerate zero-size box so the
/// exported file is never empty and downstream viewers still open it.
pub fn boxes_to_meshes(boxes: &[OrientedBox3]) -> Vec<TriangleMesh> {
    if boxes.is_empty() {
        let zero = OrientedBox3::new(
            Point3f::origin(),
            Vector3::zeros(),
            0.0,
            detvis_core::RotAxis::Z,
            detvis_core::CenterMode::Gravity,
        );
        return vec![TriangleMesh::from_box(&zero)];
    }
    boxes.iter().map(TriangleMesh::from_box).collect()
}

/// Concatenate meshes into one polygon soup and write it in the given
/// format
pub fn export_polygon_soup<P: AsRef<Path>>(
    meshes: &[TriangleMesh],
    path: P,
    format: MeshFormat,
) -> Result<()> {
    let soup = TriangleMesh::concatenate(meshes);
    log::debug!(
        "exporting polygon soup: {} vertices, {} faces -> {:?}",
        soup.vertex_count(),
        soup.face_count(),
        path.as_ref()
    );
    match format {
        MeshFormat::Obj => write_mesh_obj(&soup, path),
        MeshFormat::Ply => write_mesh_ply(&soup, path),
    }
}

/// Dump a detection result in a MeshLab-readable layout
///
/// Writes `{name}_points.obj`, `{name}_gt.obj` and `{name}_pred.obj` under
/// `out_dir/name/`, skipping the box files when the corresponding list is
/// absent.
pub fn save_detection_result<P: AsRef<Path>>(
    points: &PointCloud,
    gt_boxes: Option<&[OrientedBox3]>,
    pred_boxes: Option<&[OrientedBox3]>,
    out_dir: P,
    name: &str,
) -> Result<()> {
    let dir = out_dir.as_ref().join(name);
    std::fs::create_dir_all(&dir)?;

    write_points_obj(points, dir.join(format!("{name}_points.obj")))?;
    if let Some(gt) = gt_boxes {
        export_polygon_soup(
            &boxes_to_meshes(gt),
            dir.join(format!("{name}_gt.obj")),
            MeshFormat::Obj,
        )?;
    }
    if let Some(pred) = pred_boxes {
        export_polygon_soup(
            &boxes_to_meshes(pred),
            dir.join(format!("{name}_pred.obj")),
            MeshFormat::Obj,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use detvis_core::{CenterMode, Point3, RotAxis};

    fn sample_box() -> OrientedBox3 {
        OrientedBox3::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(2.0, 4.0, 1.5),
            0.3,
            RotAxis::Z,
            CenterMode::LidarBottom,
        )
    }

    #[test]
    fn empty_box_list_exports_degenerate_box() {
        let meshes = boxes_to_meshes(&[]);
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].vertex_count(), 8);
        assert!(meshes[0]
            .vertices
            .iter()
            .all(|v| v.coords.norm() == 0.0));
    }

    #[test]
    fn polygon_soup_concatenates_boxes() {
        let meshes = boxes_to_meshes(&[sample_box(), sample_box()]);
        let path = std::env::temp_dir()
            .join("detvis_export_tests")
            .join("soup.obj");
        export_polygon_soup(&meshes, &path, MeshFormat::Obj).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 16);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 24);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn detection_result_layout() {
        let dir = std::env::temp_dir().join("detvis_result_tests");
        let _ = std::fs::remove_dir_all(&dir);
        let cloud = PointCloud::from_points(vec![Point3::origin()]);
        save_detection_result(&cloud, Some(&[sample_box()]), None, &dir, "frame42").unwrap();
        assert!(dir.join("frame42").join("frame42_points.obj").exists());
        assert!(dir.join("frame42").join("frame42_gt.obj").exists());
        assert!(!dir.join("frame42").join("frame42_pred.obj").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
