//! 2D canvas drawing for detvis
//!
//! This crate provides the 2D side of the pipeline: an RGB canvas with
//! anti-aliased line and circle primitives, the box-wireframe rasterizer,
//! and the image-overlay entry points that project point clouds and 3D
//! boxes onto camera images.

pub mod canvas;
pub mod rect;
pub mod overlay;
pub mod window;

pub use canvas::*;
pub use rect::*;
pub use overlay::*;
pub use window::*;
