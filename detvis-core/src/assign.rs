//! Point-to-box assignment and recoloring
//!
//! Both assignment modes mutate a working copy of the per-point color
//! array and never touch point coordinates. Boxes are applied in iteration
//! order, so a point inside several boxes ends up with the color of the
//! last one. Applying the same box list twice yields the same colors.

use crate::bbox::OrientedBox3;
use crate::error::{Error, Result};
use crate::point::{Point3f, Rgbf};
use ndarray::Array2;

/// Precomputed point-to-box membership, shape `[num_points, num_boxes]`
pub type MembershipMatrix = Array2<bool>;

/// Renormalize colors to `[0, 1]` when any channel exceeds 1
///
/// Treats such arrays as 0-255 byte colors and divides every channel by
/// 255, matching what the viewer surface expects.
pub fn normalize_colors(colors: &mut [Rgbf]) {
    let out_of_range = colors
        .iter()
        .any(|c| c.iter().any(|&ch| ch > 1.0));
    if out_of_range {
        for c in colors.iter_mut() {
            for ch in c.iter_mut() {
                *ch /= 255.0;
            }
        }
    }
}

/// Geometric mode: recolor every point contained in any box
///
/// Points are tested against each box's oriented volume in order; later
/// boxes override earlier ones. An empty box list is a no-op.
pub fn color_points_in_boxes(
    colors: &mut [Rgbf],
    points: &[Point3f],
    boxes: &[OrientedBox3],
    in_box_color: Rgbf,
) -> Result<()> {
    if points.len() != colors.len() {
        return Err(Error::shape_mismatch(
            format!("{} colors", points.len()),
            format!("{} colors", colors.len()),
        ));
    }
    for bbox in boxes {
        for (point, color) in points.iter().zip(colors.iter_mut()) {
            if bbox.contains(point) {
                *color = in_box_color;
            }
        }
    }
    Ok(())
}

/// Indexed mode: recolor point `i` when any `membership[(i, j)]` is true
///
/// Boxes are walked in column order with the same last-box-wins override
/// semantics as the geometric mode. Fails with [`Error::ShapeMismatch`]
/// when the matrix height differs from the color array length.
pub fn color_points_by_membership(
    colors: &mut [Rgbf],
    membership: &MembershipMatrix,
    in_box_color: Rgbf,
) -> Result<()> {
    if membership.nrows() != colors.len() {
        return Err(Error::shape_mismatch(
            format!("{} membership rows", colors.len()),
            format!("{} membership rows", membership.nrows()),
        ));
    }
    for j in 0..membership.ncols() {
        for (i, color) in colors.iter_mut().enumerate() {
            if membership[(i, j)] {
                *color = in_box_color;
            }
        }
    }
    Ok(())
}
