//! 3D-to-2D projection
//!
//! Points are lifted to homogeneous coordinates, multiplied by a projection
//! matrix, and perspective-divided. The depth component is clamped to a
//! small positive epsilon before the divide so points behind or at the
//! camera plane never blow up into NaN/Inf.

use crate::error::{Error, Result};
use crate::point::Point3f;
use nalgebra::{Matrix3, Matrix4, Vector4};
use serde::{Deserialize, Serialize};

/// Lower clamp for the perspective-divide depth
pub const DEPTH_EPS: f32 = 1e-5;

/// Upper clamp for the perspective-divide depth
pub const DEPTH_MAX: f32 = 1e5;

/// A projection matrix, either full homogeneous or pinhole intrinsic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionMatrix {
    /// 4×4 homogeneous projection (e.g. lidar-to-image)
    Homogeneous(Matrix4<f32>),
    /// 3×3 pinhole intrinsic `K`
    Intrinsic(Matrix3<f32>),
}

impl ProjectionMatrix {
    /// Build from row-major scalars; 16 elements for 4×4, 9 for 3×3
    ///
    /// Fails with [`Error::ShapeMismatch`] on any other length.
    pub fn from_rows(values: &[f32]) -> Result<Self> {
        match values.len() {
            16 => Ok(ProjectionMatrix::Homogeneous(
                Matrix4::from_row_slice(values),
            )),
            9 => Ok(ProjectionMatrix::Intrinsic(Matrix3::from_row_slice(values))),
            n => Err(Error::shape_mismatch("16 or 9 matrix elements", n.to_string())),
        }
    }

    /// The matrix as a 4×4, embedding a 3×3 intrinsic in the top-left of
    /// an identity
    pub fn to_homogeneous(&self) -> Matrix4<f32> {
        match self {
            ProjectionMatrix::Homogeneous(m) => *m,
            ProjectionMatrix::Intrinsic(k) => {
                let mut m = Matrix4::identity();
                m.fixed_view_mut::<3, 3>(0, 0).copy_from(k);
                m
            }
        }
    }
}

impl From<Matrix4<f32>> for ProjectionMatrix {
    fn from(m: Matrix4<f32>) -> Self {
        ProjectionMatrix::Homogeneous(m)
    }
}

impl From<Matrix3<f32>> for ProjectionMatrix {
    fn from(k: Matrix3<f32>) -> Self {
        ProjectionMatrix::Intrinsic(k)
    }
}

/// A projected point on the image plane, with its clamped depth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub u: f32,
    pub v: f32,
    pub depth: f32,
}

/// Project 3D points onto the image plane
///
/// Each point gets a homogeneous 1 appended, is multiplied by the matrix,
/// has its depth clamped into `[DEPTH_EPS, DEPTH_MAX]`, and is divided by
/// that depth to obtain pixel coordinates.
pub fn project_points(points: &[Point3f], matrix: &ProjectionMatrix) -> Vec<ImagePoint> {
    let m = matrix.to_homogeneous();
    points
        .iter()
        .map(|p| {
            let h = m * Vector4::new(p.x, p.y, p.z, 1.0);
            let depth = h.z.clamp(DEPTH_EPS, DEPTH_MAX);
            ImagePoint {
                u: h.x / depth,
                v: h.y / depth,
                depth,
            }
        })
        .collect()
}

/// Field-of-view mask: true iff the pixel falls within `[0, width) × [0, height)`
///
/// Used by the point-overlay path only; box projection draws whatever
/// corners result, even off-canvas.
pub fn fov_mask(points: &[ImagePoint], width: u32, height: u32) -> Vec<bool> {
    points
        .iter()
        .map(|p| p.u >= 0.0 && p.u < width as f32 && p.v >= 0.0 && p.v < height as f32)
        .collect()
}
