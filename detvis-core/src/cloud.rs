//! Point cloud container with optional per-point colors

use crate::convention::RotAxis;
use crate::error::{Error, Result};
use crate::point::{Point3f, Rgbf};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered point cloud with an optional parallel color array
///
/// Order is visualization-stable but carries no semantic meaning. Colors,
/// when present, are normalized floats in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloud {
    pub positions: Vec<Point3f>,
    pub colors: Option<Vec<Rgbf>>,
}

impl PointCloud {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            colors: None,
        }
    }

    /// Create a point cloud from bare positions
    pub fn from_points(positions: Vec<Point3f>) -> Self {
        Self {
            positions,
            colors: None,
        }
    }

    /// Create a point cloud from positions and per-point colors
    ///
    /// Fails with [`Error::ShapeMismatch`] when the arrays differ in length.
    /// Colors are renormalized to `[0, 1]` when any channel exceeds 1.
    pub fn from_points_and_colors(positions: Vec<Point3f>, mut colors: Vec<Rgbf>) -> Result<Self> {
        if positions.len() != colors.len() {
            return Err(Error::shape_mismatch(
                format!("{} colors", positions.len()),
                format!("{} colors", colors.len()),
            ));
        }
        crate::assign::normalize_colors(&mut colors);
        Ok(Self {
            positions,
            colors: Some(colors),
        })
    }

    /// Create a point cloud from flat rows of 3 (`x y z`) or 6
    /// (`x y z r g b`) scalars
    ///
    /// Any other row width fails with [`Error::ShapeMismatch`]. Color rows
    /// are renormalized to `[0, 1]` when any channel exceeds 1 (e.g. 0-255
    /// byte colors).
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let mut positions = Vec::with_capacity(rows.len());
        let mut colors = Vec::new();
        for row in rows {
            match row.len() {
                3 => positions.push(Point3f::new(row[0], row[1], row[2])),
                6 => {
                    positions.push(Point3f::new(row[0], row[1], row[2]));
                    colors.push([row[3], row[4], row[5]]);
                }
                n => {
                    return Err(Error::shape_mismatch(
                        "rows of 3 or 6 scalars",
                        format!("row of {n}"),
                    ))
                }
            }
        }
        if !colors.is_empty() && colors.len() != positions.len() {
            return Err(Error::shape_mismatch(
                "uniform row width",
                "mixed 3- and 6-column rows",
            ));
        }
        let colors = if colors.is_empty() {
            None
        } else {
            crate::assign::normalize_colors(&mut colors);
            Some(colors)
        };
        Ok(Self { positions, colors })
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: Point3f) {
        self.positions.push(point);
    }

    /// Get an iterator over the positions
    pub fn iter(&self) -> std::slice::Iter<Point3f> {
        self.positions.iter()
    }

    /// Get the axis-aligned bounding box of the cloud
    ///
    /// Returns `(origin, origin)` for an empty cloud.
    pub fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.positions[0];
        let mut max = self.positions[0];
        for p in &self.positions {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);

            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        (min, max)
    }

    /// Extent of the cloud along one axis (`max - min`)
    pub fn extent(&self, axis: RotAxis) -> f32 {
        let (min, max) = self.bounding_box();
        max[axis.index()] - min[axis.index()]
    }

    /// Translate every point along one axis
    pub fn translate_axis(&mut self, axis: RotAxis, offset: f32) {
        for p in &mut self.positions {
            p[axis.index()] += offset;
        }
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3f;

    fn index(&self, index: usize) -> &Self::Output {
        &self.positions[index]
    }
}

impl FromIterator<Point3f> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3f>>(iter: I) -> Self {
        Self::from_points(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_rows_accepts_xyz_and_xyzrgb() {
        let cloud = PointCloud::from_rows(&[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
        assert_eq!(cloud.len(), 2);
        assert!(cloud.colors.is_none());

        let cloud =
            PointCloud::from_rows(&[vec![0.0, 0.0, 0.0, 0.2, 0.4, 0.6]]).unwrap();
        let colors = cloud.colors.unwrap();
        assert_relative_eq!(colors[0][2], 0.6);
    }

    #[test]
    fn from_rows_normalizes_byte_colors() {
        let cloud =
            PointCloud::from_rows(&[vec![0.0, 0.0, 0.0, 255.0, 0.0, 127.5]]).unwrap();
        let colors = cloud.colors.unwrap();
        assert_relative_eq!(colors[0][0], 1.0);
        assert_relative_eq!(colors[0][2], 0.5);
    }

    #[test]
    fn from_rows_rejects_bad_width() {
        assert!(matches!(
            PointCloud::from_rows(&[vec![0.0, 1.0]]),
            Err(crate::Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn extent_is_max_minus_min() {
        let cloud = PointCloud::from_points(vec![
            Point3f::new(-1.0, 0.0, 0.0),
            Point3f::new(3.0, 2.0, 0.0),
        ]);
        assert_relative_eq!(cloud.extent(RotAxis::X), 4.0);
        assert_relative_eq!(cloud.extent(RotAxis::Y), 2.0);
        assert_relative_eq!(cloud.extent(RotAxis::Z), 0.0);
    }
}
