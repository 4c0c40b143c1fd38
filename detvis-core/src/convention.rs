//! Coordinate-frame conventions for boxes and points
//!
//! Detection frameworks hand over boxes in one of three parameterizations
//! (lidar, camera, depth) that differ in which axis the yaw rotates about
//! and whether the reported center sits at the bottom face or the gravity
//! center. All three are closed enums validated at construction; no string
//! flags survive past the API boundary.

use crate::error::{Error, Result};
use crate::point::Point3f;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The coordinate axis a box yaw rotates about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotAxis {
    X,
    Y,
    Z,
}

impl RotAxis {
    /// Build from a 0/1/2 axis index, failing with [`Error::InvalidAxis`]
    /// on anything else
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(RotAxis::X),
            1 => Ok(RotAxis::Y),
            2 => Ok(RotAxis::Z),
            n => Err(Error::InvalidAxis(n)),
        }
    }

    /// The 0/1/2 index of this axis
    pub fn index(self) -> usize {
        match self {
            RotAxis::X => 0,
            RotAxis::Y => 1,
            RotAxis::Z => 2,
        }
    }

    /// The two axes orthogonal to this one, in cyclic order
    pub fn orthogonal(self) -> (usize, usize) {
        match self {
            RotAxis::X => (1, 2),
            RotAxis::Y => (2, 0),
            RotAxis::Z => (0, 1),
        }
    }
}

/// Where the reported box center sits relative to the box volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterMode {
    /// Bottom-face center; gravity center is `size[axis] / 2` further
    /// along the rotation axis
    LidarBottom,
    /// Bottom-face center in a y-down frame; gravity center is
    /// `size[axis] / 2` back along the rotation axis
    CameraBottom,
    /// The reported center already is the gravity center
    Gravity,
}

impl FromStr for CenterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lidar_bottom" => Ok(CenterMode::LidarBottom),
            "camera_bottom" => Ok(CenterMode::CameraBottom),
            "gravity" => Ok(CenterMode::Gravity),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Layout of incoming point rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Bare `x y z` rows; points take a uniform color
    Xyz,
    /// `x y z r g b` rows carrying their own colors
    XyzRgb,
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "xyz" => Ok(ColorMode::Xyz),
            "xyzrgb" => Ok(ColorMode::XyzRgb),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

/// Sign applied to the yaw angle before deriving box corners
///
/// Both conventions occur in the wild: geometric point assignment uses the
/// yaw as given, while membership-driven pipelines commonly negate it. They
/// are distinct, explicit options rather than an implicit choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YawSign {
    Positive,
    Negative,
}

impl YawSign {
    pub fn apply(self, yaw: f32) -> f32 {
        match self {
            YawSign::Positive => yaw,
            YawSign::Negative => -yaw,
        }
    }
}

/// The three supported box parameterizations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxConvention {
    /// z-up lidar frame, yaw about z, bottom center
    Lidar,
    /// y-down camera frame, yaw about y, bottom center
    Camera,
    /// z-up depth frame, yaw about z, gravity center
    Depth,
}

impl BoxConvention {
    /// Default rotation axis for boxes in this convention
    pub fn rot_axis(self) -> RotAxis {
        match self {
            BoxConvention::Lidar | BoxConvention::Depth => RotAxis::Z,
            BoxConvention::Camera => RotAxis::Y,
        }
    }

    /// Default center mode for boxes in this convention
    pub fn center_mode(self) -> CenterMode {
        match self {
            BoxConvention::Lidar => CenterMode::LidarBottom,
            BoxConvention::Camera => CenterMode::CameraBottom,
            BoxConvention::Depth => CenterMode::Gravity,
        }
    }
}

/// Strategy for undoing convention-specific data transforms before
/// projection
///
/// Depth- and camera-frame pipelines often augment points (flips, scaling)
/// during preprocessing; projecting their boxes onto the raw image requires
/// reversing that augmentation first. The core stays agnostic to which
/// transform applies by calling through this seam.
pub trait ReverseTransform {
    fn reverse(&self, points: &[Point3f]) -> Vec<Point3f>;
}

/// The no-op reverse transform
pub struct IdentityTransform;

impl ReverseTransform for IdentityTransform {
    fn reverse(&self, points: &[Point3f]) -> Vec<Point3f> {
        points.to_vec()
    }
}
