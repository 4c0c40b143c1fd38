//! Oriented 3D bounding boxes
//!
//! Boxes arrive as 7-scalar rows `(cx, cy, cz, sx, sy, sz, yaw)` plus a
//! rotation-axis and center-mode convention. Corners are derived once at
//! construction in a fixed vertex order shared with the wireframe edge
//! table, and the box is immutable from then on.

use crate::convention::{BoxConvention, CenterMode, RotAxis, YawSign};
use crate::point::{Point3f, Vector3f};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// The 12 edges of a box wireframe, as index pairs into the 8-corner array
///
/// Vertex order: bottom ring `0..4` counter-clockwise, top ring `4..8`
/// directly above. Each cube edge appears exactly once.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (0, 3),
    (0, 4),
    (1, 2),
    (1, 5),
    (3, 2),
    (3, 7),
    (4, 5),
    (4, 7),
    (2, 6),
    (5, 6),
    (6, 7),
];

// Half-extent sign pattern per corner, matching BOX_EDGES.
const CORNER_SIGNS: [[f32; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Rotation matrix about a single coordinate axis
///
/// Identity except for the 2×2 block rotating the two axes orthogonal to
/// `axis` by `yaw`.
pub fn rotation_matrix(yaw: f32, axis: RotAxis) -> Matrix3<f32> {
    let (c, s) = (yaw.cos(), yaw.sin());
    let (a, b) = axis.orthogonal();
    let mut m = Matrix3::identity();
    m[(a, a)] = c;
    m[(a, b)] = -s;
    m[(b, a)] = s;
    m[(b, b)] = c;
    m
}

/// A cuboid defined by center, per-axis extents, and a single rotation
/// angle about one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox3 {
    center: Point3f,
    size: Vector3f,
    yaw: f32,
    rot_axis: RotAxis,
    center_mode: CenterMode,
    corners: [Point3f; 8],
}

impl OrientedBox3 {
    /// Create a box from its parameters, deriving the 8 corners
    pub fn new(
        center: Point3f,
        size: Vector3f,
        yaw: f32,
        rot_axis: RotAxis,
        center_mode: CenterMode,
    ) -> Self {
        let corners = derive_corners(center, size, yaw, rot_axis, center_mode);
        Self {
            center,
            size,
            yaw,
            rot_axis,
            center_mode,
            corners,
        }
    }

    /// Create a box from a 7-scalar row `(cx, cy, cz, sx, sy, sz, yaw)`
    pub fn from_row(row: &[f32; 7], rot_axis: RotAxis, center_mode: CenterMode) -> Self {
        Self::new(
            Point3f::new(row[0], row[1], row[2]),
            Vector3f::new(row[3], row[4], row[5]),
            row[6],
            rot_axis,
            center_mode,
        )
    }

    /// Create a box from a 7-scalar row using a named convention's
    /// rotation axis and center mode
    pub fn from_convention(row: &[f32; 7], convention: BoxConvention) -> Self {
        Self::from_row(row, convention.rot_axis(), convention.center_mode())
    }

    /// Rebuild this box with the given sign applied to its yaw
    pub fn with_yaw_sign(&self, sign: YawSign) -> Self {
        Self::new(
            self.center,
            self.size,
            sign.apply(self.yaw),
            self.rot_axis,
            self.center_mode,
        )
    }

    /// The center as given at construction (bottom or gravity, per mode)
    pub fn center(&self) -> Point3f {
        self.center
    }

    /// Per-axis extents
    pub fn size(&self) -> Vector3f {
        self.size
    }

    /// Yaw angle in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rot_axis(&self) -> RotAxis {
        self.rot_axis
    }

    pub fn center_mode(&self) -> CenterMode {
        self.center_mode
    }

    /// The gravity center after center-mode correction
    pub fn gravity_center(&self) -> Point3f {
        gravity_center(self.center, self.size, self.rot_axis, self.center_mode)
    }

    /// The box rotation as a 3×3 matrix
    pub fn rotation(&self) -> Matrix3<f32> {
        rotation_matrix(self.yaw, self.rot_axis)
    }

    /// The 8 corners, one row per cube vertex in [`BOX_EDGES`] order
    pub fn corners(&self) -> &[Point3f; 8] {
        &self.corners
    }

    /// Test whether a point lies inside the box volume
    ///
    /// The point is transformed into box-local axes and compared against
    /// the half-extents on all three axes.
    pub fn contains(&self, point: &Point3f) -> bool {
        let local = self.rotation().transpose() * (point - self.gravity_center());
        local
            .iter()
            .zip(self.size.iter())
            .all(|(d, s)| d.abs() <= s / 2.0)
    }
}

fn gravity_center(
    center: Point3f,
    size: Vector3f,
    rot_axis: RotAxis,
    center_mode: CenterMode,
) -> Point3f {
    let mut center = center;
    let axis = rot_axis.index();
    match center_mode {
        CenterMode::LidarBottom => center[axis] += size[axis] / 2.0,
        CenterMode::CameraBottom => center[axis] -= size[axis] / 2.0,
        CenterMode::Gravity => {}
    }
    center
}

fn derive_corners(
    center: Point3f,
    size: Vector3f,
    yaw: f32,
    rot_axis: RotAxis,
    center_mode: CenterMode,
) -> [Point3f; 8] {
    let gravity = gravity_center(center, size, rot_axis, center_mode);
    let rot = rotation_matrix(yaw, rot_axis);
    CORNER_SIGNS.map(|signs| {
        let local = Vector3f::new(
            signs[0] * size.x / 2.0,
            signs[1] * size.y / 2.0,
            signs[2] * size.z / 2.0,
        );
        gravity + rot * local
    })
}

/// Build boxes from 7-scalar rows under one convention, applying a yaw
/// sign to each
pub fn boxes_from_rows(
    rows: &[[f32; 7]],
    rot_axis: RotAxis,
    center_mode: CenterMode,
    yaw_sign: YawSign,
) -> Vec<OrientedBox3> {
    rows.iter()
        .map(|row| {
            OrientedBox3::new(
                Point3f::new(row[0], row[1], row[2]),
                Vector3f::new(row[3], row[4], row[5]),
                yaw_sign.apply(row[6]),
                rot_axis,
                center_mode,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box(center_mode: CenterMode) -> OrientedBox3 {
        OrientedBox3::new(
            Point3f::origin(),
            Vector3f::new(2.0, 2.0, 2.0),
            0.0,
            RotAxis::Z,
            center_mode,
        )
    }

    #[test]
    fn edge_table_traces_each_cube_edge_once() {
        // Every pair in the table must differ in exactly one sign
        // component, and every vertex must have degree 3.
        let mut degree = [0usize; 8];
        for &(a, b) in &BOX_EDGES {
            let diff = (0..3)
                .filter(|&i| CORNER_SIGNS[a][i] != CORNER_SIGNS[b][i])
                .count();
            assert_eq!(diff, 1, "({a},{b}) is not a cube edge");
            degree[a] += 1;
            degree[b] += 1;
        }
        assert!(degree.iter().all(|&d| d == 3));
    }

    #[test]
    fn gravity_box_has_unit_corners() {
        let corners = *unit_box(CenterMode::Gravity).corners();
        for corner in &corners {
            for i in 0..3 {
                assert_relative_eq!(corner[i].abs(), 1.0, epsilon = 1e-6);
            }
        }
        // all 8 sign combinations present
        let mut seen = std::collections::HashSet::new();
        for corner in &corners {
            seen.insert((corner.x > 0.0, corner.y > 0.0, corner.z > 0.0));
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn lidar_bottom_shifts_up_camera_bottom_shifts_down() {
        let up = unit_box(CenterMode::LidarBottom).gravity_center();
        assert_relative_eq!(up.z, 1.0);
        let down = unit_box(CenterMode::CameraBottom).gravity_center();
        assert_relative_eq!(down.z, -1.0);
        let same = unit_box(CenterMode::Gravity).gravity_center();
        assert_relative_eq!(same.z, 0.0);
    }

    #[test]
    fn rotation_matrix_blocks() {
        let rz = rotation_matrix(std::f32::consts::FRAC_PI_2, RotAxis::Z);
        let rotated = rz * Vector3f::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-6);

        let ry = rotation_matrix(std::f32::consts::FRAC_PI_2, RotAxis::Y);
        let rotated = ry * Vector3f::new(1.0, 0.0, 0.0);
        assert_relative_eq!(rotated.z, -1.0, epsilon = 1e-6);

        // axis coordinate untouched
        let rx = rotation_matrix(1.234, RotAxis::X);
        assert_relative_eq!(rx[(0, 0)], 1.0);
        assert_relative_eq!(rx[(0, 1)], 0.0);
        assert_relative_eq!(rx[(1, 0)], 0.0);
    }

    #[test]
    fn yaw_round_trip_recovers_corners() {
        let yaw = 0.7;
        let base = OrientedBox3::new(
            Point3f::new(1.0, -2.0, 3.0),
            Vector3f::new(4.0, 2.0, 1.5),
            0.0,
            RotAxis::Z,
            CenterMode::Gravity,
        );
        let rotated = OrientedBox3::new(
            base.center(),
            base.size(),
            yaw,
            RotAxis::Z,
            CenterMode::Gravity,
        );
        // rotating the derived corners back by -yaw about the center must
        // reproduce the axis-aligned corners
        let back = rotation_matrix(-yaw, RotAxis::Z);
        for (orig, rot) in base.corners().iter().zip(rotated.corners()) {
            let recovered = rotated.gravity_center() + back * (rot - rotated.gravity_center());
            assert_relative_eq!(recovered.x, orig.x, epsilon = 1e-5);
            assert_relative_eq!(recovered.y, orig.y, epsilon = 1e-5);
            assert_relative_eq!(recovered.z, orig.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn contains_origin_in_unit_box() {
        let boxed = unit_box(CenterMode::Gravity);
        assert!(boxed.contains(&Point3f::origin()));
        assert!(boxed.contains(&Point3f::new(0.99, 0.99, 0.99)));
        assert!(!boxed.contains(&Point3f::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn contains_respects_rotation() {
        // 4x1x1 box rotated 90 degrees about z: long axis now along y
        let boxed = OrientedBox3::new(
            Point3f::origin(),
            Vector3f::new(4.0, 1.0, 1.0),
            std::f32::consts::FRAC_PI_2,
            RotAxis::Z,
            CenterMode::Gravity,
        );
        assert!(boxed.contains(&Point3f::new(0.0, 1.9, 0.0)));
        assert!(!boxed.contains(&Point3f::new(1.9, 0.0, 0.0)));
    }

    #[test]
    fn yaw_signs_mirror_corners() {
        let row = [0.0, 0.0, 0.0, 4.0, 2.0, 1.0, 0.5];
        let pos = boxes_from_rows(&[row], RotAxis::Z, CenterMode::Gravity, YawSign::Positive);
        let neg = boxes_from_rows(&[row], RotAxis::Z, CenterMode::Gravity, YawSign::Negative);
        assert_relative_eq!(pos[0].yaw(), 0.5);
        assert_relative_eq!(neg[0].yaw(), -0.5);
        // negating the yaw mirrors the corner set about the xz plane;
        // the mirror maps each vertex to its y-flipped counterpart
        let y_flip = [3, 2, 1, 0, 7, 6, 5, 4];
        for (k, p) in pos[0].corners().iter().enumerate() {
            let n = neg[0].corners()[y_flip[k]];
            assert_relative_eq!(p.x, n.x, epsilon = 1e-6);
            assert_relative_eq!(p.y, -n.y, epsilon = 1e-6);
            assert_relative_eq!(p.z, n.z, epsilon = 1e-6);
        }
    }
}
