//! Wireframe rasterization of projected boxes
//!
//! Pure 2D: takes 8 projected corners per box and draws the 12 edges of
//! the shared cube topology. No FOV culling happens here; edges running
//! off the canvas are clipped pixel by pixel, so partially visible boxes
//! still render their on-screen portion.

use crate::canvas::Canvas;
use detvis_core::BOX_EDGES;

/// The 8 projected corners of one box, in [`BOX_EDGES`] vertex order
pub type CornerSet2D = [[f32; 2]; 8];

/// Draw the 12 wireframe edges of each box onto the canvas
pub fn draw_box_wireframes(
    canvas: &mut Canvas,
    corner_sets: &[CornerSet2D],
    color: [u8; 3],
    thickness: u32,
) {
    for corners in corner_sets {
        for &(start, end) in &BOX_EDGES {
            canvas.draw_line(corners[start], corners[end], color, thickness);
        }
    }
}
