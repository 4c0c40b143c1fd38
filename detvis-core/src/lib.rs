//! Core data structures and geometry for detvis
//!
//! This crate provides the geometric pipeline shared by every detvis entry
//! point: coordinate-frame conventions, oriented-box construction from
//! center/size/yaw parameters, 3D-to-2D projection, and point-to-box
//! membership assignment used to recolor points.

pub mod point;
pub mod cloud;
pub mod convention;
pub mod bbox;
pub mod projection;
pub mod palette;
pub mod assign;
pub mod error;

pub use point::*;
pub use cloud::*;
pub use convention::*;
pub use bbox::*;
pub use projection::*;
pub use palette::*;
pub use assign::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};
