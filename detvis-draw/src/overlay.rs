//! Image overlays: point clouds and 3D boxes projected onto camera images
//!
//! The lidar path projects through a full 4×4 lidar-to-image matrix. The
//! camera and depth paths project through a pinhole intrinsic and use the
//! 1-based pixel origin of the common calibration tooling, so projected
//! coordinates are shifted by one and rounded. The depth path additionally
//! undoes convention-specific data augmentation through an injected
//! [`ReverseTransform`] before projecting.

use crate::canvas::Canvas;
use crate::rect::{draw_box_wireframes, CornerSet2D};
use detvis_core::{
    fov_mask, project_points, DepthPalette, OrientedBox3, Point3f, ProjectionMatrix,
    ReverseTransform,
};

/// Project a point cloud onto the image and draw depth-colored circles
///
/// Points whose pixel falls outside the canvas are skipped (FOV mask);
/// the rest are colored by the cyclic depth palette. Negative thickness
/// fills the circles, as the box-drawing convention does.
pub fn draw_points_on_image(
    canvas: &mut Canvas,
    points: &[Point3f],
    matrix: &ProjectionMatrix,
    max_distance: f32,
    palette: &DepthPalette,
    radius: i32,
    thickness: i32,
) {
    let projected = project_points(points, matrix);
    let mask = fov_mask(&projected, canvas.width(), canvas.height());
    log::debug!(
        "point overlay: {} of {} points in view",
        mask.iter().filter(|&&m| m).count(),
        points.len()
    );
    for (p, visible) in projected.iter().zip(mask) {
        if !visible {
            continue;
        }
        let color = palette.color_for_depth(p.depth, max_distance);
        canvas.draw_circle([p.u.round(), p.v.round()], radius, color, thickness);
    }
}

/// Project each box's 8 corners through the matrix
///
/// No FOV culling: off-canvas corners project to off-canvas pixels and the
/// rasterizer clips the edges, so partially visible boxes still render.
pub fn project_box_corners(boxes: &[OrientedBox3], matrix: &ProjectionMatrix) -> Vec<CornerSet2D> {
    boxes
        .iter()
        .map(|bbox| {
            let projected = project_points(bbox.corners(), matrix);
            let mut corners = [[0.0f32; 2]; 8];
            for (c, p) in corners.iter_mut().zip(projected) {
                *c = [p.u, p.v];
            }
            corners
        })
        .collect()
}

/// Draw lidar-frame boxes onto the image through a 4×4 lidar-to-image
/// projection
pub fn draw_lidar_boxes_on_image(
    canvas: &mut Canvas,
    boxes: &[OrientedBox3],
    lidar_to_image: &ProjectionMatrix,
    color: [u8; 3],
    thickness: u32,
) {
    let corner_sets = project_box_corners(boxes, lidar_to_image);
    draw_box_wireframes(canvas, &corner_sets, color, thickness);
}

/// Draw camera-frame boxes onto the image through a 3×3 or 4×4 intrinsic
///
/// Projected pixels use a 1-based origin and are rounded, matching the
/// calibration convention the camera path inherits.
pub fn draw_camera_boxes_on_image(
    canvas: &mut Canvas,
    boxes: &[OrientedBox3],
    cam_to_image: &ProjectionMatrix,
    color: [u8; 3],
    thickness: u32,
) {
    let mut corner_sets = project_box_corners(boxes, cam_to_image);
    shift_to_zero_based(&mut corner_sets);
    draw_box_wireframes(canvas, &corner_sets, color, thickness);
}

/// Draw depth-frame boxes onto the image, undoing data augmentation first
///
/// The corners are run through the injected [`ReverseTransform`] (e.g. an
/// inverse flip/scale recorded during preprocessing) before projection.
pub fn draw_depth_boxes_on_image(
    canvas: &mut Canvas,
    boxes: &[OrientedBox3],
    depth_to_image: &ProjectionMatrix,
    reverse: &dyn ReverseTransform,
    color: [u8; 3],
    thickness: u32,
) {
    let corner_sets: Vec<CornerSet2D> = boxes
        .iter()
        .map(|bbox| {
            let reversed = reverse.reverse(bbox.corners());
            let projected = project_points(&reversed, depth_to_image);
            let mut corners = [[0.0f32; 2]; 8];
            for (c, p) in corners.iter_mut().zip(projected) {
                *c = [p.u, p.v];
            }
            corners
        })
        .collect();
    let mut corner_sets = corner_sets;
    shift_to_zero_based(&mut corner_sets);
    draw_box_wireframes(canvas, &corner_sets, color, thickness);
}

// 1-based calibration pixels to 0-based canvas pixels, rounded.
fn shift_to_zero_based(corner_sets: &mut [CornerSet2D]) {
    for corners in corner_sets.iter_mut() {
        for c in corners.iter_mut() {
            c[0] = (c[0] - 1.0).round();
            c[1] = (c[1] - 1.0).round();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use detvis_core::{CenterMode, IdentityTransform, Matrix3, RotAxis, Vector3};
    use image::Rgb;

    fn intrinsic() -> ProjectionMatrix {
        Matrix3::new(10.0, 0.0, 32.0, 0.0, 10.0, 32.0, 0.0, 0.0, 1.0).into()
    }

    fn box_in_front() -> OrientedBox3 {
        OrientedBox3::new(
            detvis_core::Point3::new(0.0, 0.0, 10.0),
            Vector3::new(2.0, 2.0, 2.0),
            0.0,
            RotAxis::Y,
            CenterMode::Gravity,
        )
    }

    #[test]
    fn point_overlay_draws_in_fov_points_only() {
        let mut canvas = Canvas::new(64, 64);
        let points = vec![
            Point3f::new(0.0, 0.0, 5.0),     // projects to (32, 32)
            Point3f::new(100.0, 0.0, 1.0),   // far off canvas
        ];
        let palette = DepthPalette::hsv_cycle();
        draw_points_on_image(&mut canvas, &points, &intrinsic(), 70.0, &palette, 1, -1);
        assert_ne!(*canvas.image().get_pixel(32, 32), Rgb([0, 0, 0]));
    }

    #[test]
    fn projected_corner_sets_have_eight_entries() {
        let sets = project_box_corners(&[box_in_front()], &intrinsic());
        assert_eq!(sets.len(), 1);
        // center column of the box projects near the principal point
        let mean_u: f32 = sets[0].iter().map(|c| c[0]).sum::<f32>() / 8.0;
        assert!((mean_u - 32.0).abs() < 1.0);
    }

    #[test]
    fn lidar_boxes_render_without_culling() {
        let mut canvas = Canvas::new(64, 64);
        draw_lidar_boxes_on_image(&mut canvas, &[box_in_front()], &intrinsic(), [0, 255, 0], 1);
        let lit = canvas.image().pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(lit > 0);
    }

    #[test]
    fn box_straddling_the_near_plane_still_renders() {
        // corners behind the camera get their depth clamped near zero and
        // project enormously far off-canvas; the visible edges must still
        // come out without the rasterizer walking that whole span
        let straddling = OrientedBox3::new(
            detvis_core::Point3::new(0.0, 0.0, 0.5),
            Vector3::new(2.0, 2.0, 2.0),
            0.0,
            RotAxis::Y,
            CenterMode::Gravity,
        );
        let wide = ProjectionMatrix::from(Matrix3::new(
            500.0, 0.0, 320.0, 0.0, 500.0, 240.0, 0.0, 0.0, 1.0,
        ));
        let mut canvas = Canvas::new(640, 480);
        draw_lidar_boxes_on_image(&mut canvas, &[straddling], &wide, [0, 255, 0], 1);
        let lit = canvas.image().pixels().filter(|p| p.0 != [0, 0, 0]).count();
        assert!(lit > 0);
    }

    #[test]
    fn depth_boxes_with_identity_reverse_match_camera_path() {
        let boxes = [box_in_front()];
        let mut via_depth = Canvas::new(64, 64);
        draw_depth_boxes_on_image(
            &mut via_depth,
            &boxes,
            &intrinsic(),
            &IdentityTransform,
            [255, 0, 0],
            1,
        );
        let mut via_camera = Canvas::new(64, 64);
        draw_camera_boxes_on_image(&mut via_camera, &boxes, &intrinsic(), [255, 0, 0], 1);
        assert_eq!(via_depth.image().as_raw(), via_camera.image().as_raw());
    }
}
