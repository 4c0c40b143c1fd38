//! RGB canvas with anti-aliased primitives
//!
//! A thin wrapper over `image::RgbImage` exposing the two primitives the
//! overlay paths need: alpha-blended Xiaolin-Wu line segments and circles
//! with OpenCV-style thickness semantics (negative thickness = filled).
//! Off-canvas pixels are clipped at the pixel level, so segments that run
//! past the border still render their visible portion.

use detvis_core::{Error, Result};
use image::RgbImage;
use std::path::Path;

/// An RGB drawing surface backed by an image buffer
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Create a black canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    /// Wrap an existing image buffer
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying image buffer
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Consume the canvas, yielding the image buffer
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Blend a color into one pixel with coverage `alpha` in `[0, 1]`
    ///
    /// Coordinates outside the canvas are silently clipped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 3], alpha: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let blended = color[c] as f32 * alpha + px.0[c] as f32 * (1.0 - alpha);
            px.0[c] = blended.round() as u8;
        }
    }

    /// Draw an anti-aliased line segment of the given thickness
    ///
    /// Thickness 1 is a single Xiaolin-Wu line; larger thicknesses draw
    /// parallel Wu lines offset perpendicular to the segment.
    pub fn draw_line(&mut self, p0: [f32; 2], p1: [f32; 2], color: [u8; 3], thickness: u32) {
        let thickness = thickness.max(1);
        if thickness == 1 {
            self.wu_line(p0, p1, color);
            return;
        }
        let dx = p1[0] - p0[0];
        let dy = p1[1] - p0[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len < f32::EPSILON {
            self.draw_circle(p0, (thickness / 2) as i32, color, -1);
            return;
        }
        // unit normal to the segment
        let (nx, ny) = (-dy / len, dx / len);
        let half = (thickness as f32 - 1.0) / 2.0;
        for k in 0..thickness {
            let off = k as f32 - half;
            self.wu_line(
                [p0[0] + nx * off, p0[1] + ny * off],
                [p1[0] + nx * off, p1[1] + ny * off],
                color,
            );
        }
    }

    /// Draw a circle; negative thickness fills the disc, non-negative
    /// strokes a ring of that width
    pub fn draw_circle(&mut self, center: [f32; 2], radius: i32, color: [u8; 3], thickness: i32) {
        let radius = radius.max(0) as f32;
        let reach = radius + thickness.max(1) as f32 + 1.0;
        let (cx, cy) = (center[0], center[1]);
        let x0 = (cx - reach).floor() as i64;
        let x1 = (cx + reach).ceil() as i64;
        let y0 = (cy - reach).floor() as i64;
        let y1 = (cy + reach).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let alpha = if thickness < 0 {
                    radius + 0.5 - dist
                } else {
                    let half = thickness as f32 / 2.0;
                    half + 0.5 - (dist - radius).abs()
                };
                if alpha > 0.0 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Save the canvas, creating missing parent directories first
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.image
            .save(path)
            .map_err(|e| Error::Image(e.to_string()))
    }

    // Liang-Barsky clip against the canvas rectangle, with one pixel of
    // margin so edge anti-aliasing survives. Box corners clamped to the
    // near plane can project millions of pixels off-canvas; without this
    // the per-column loop below would walk that whole span.
    fn clip_segment(&self, p0: [f32; 2], p1: [f32; 2]) -> Option<([f32; 2], [f32; 2])> {
        let (xmin, ymin) = (-1.0f32, -1.0f32);
        let (xmax, ymax) = (self.width() as f32 + 1.0, self.height() as f32 + 1.0);
        let dx = p1[0] - p0[0];
        let dy = p1[1] - p0[1];
        let mut t0 = 0.0f32;
        let mut t1 = 1.0f32;
        for (p, q) in [
            (-dx, p0[0] - xmin),
            (dx, xmax - p0[0]),
            (-dy, p0[1] - ymin),
            (dy, ymax - p0[1]),
        ] {
            if p.abs() < f32::EPSILON {
                if q < 0.0 {
                    return None;
                }
            } else {
                let r = q / p;
                if p < 0.0 {
                    if r > t1 {
                        return None;
                    }
                    t0 = t0.max(r);
                } else {
                    if r < t0 {
                        return None;
                    }
                    t1 = t1.min(r);
                }
            }
        }
        Some((
            [p0[0] + t0 * dx, p0[1] + t0 * dy],
            [p0[0] + t1 * dx, p0[1] + t1 * dy],
        ))
    }

    // Xiaolin Wu's anti-aliased line.
    fn wu_line(&mut self, p0: [f32; 2], p1: [f32; 2], color: [u8; 3]) {
        let (p0, p1) = match self.clip_segment(p0, p1) {
            Some(clipped) => clipped,
            None => return,
        };
        let steep = (p1[1] - p0[1]).abs() > (p1[0] - p0[0]).abs();
        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (p0[1], p0[0], p1[1], p1[0])
        } else {
            (p0[0], p0[1], p1[0], p1[1])
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let gradient = if dx.abs() < f32::EPSILON {
            1.0
        } else {
            (y1 - y0) / dx
        };

        let mut plot = |x: i64, y: i64, a: f32, canvas: &mut Canvas| {
            if steep {
                canvas.blend_pixel(y, x, color, a);
            } else {
                canvas.blend_pixel(x, y, color, a);
            }
        };

        // first endpoint
        let xend = x0.round();
        let yend = y0 + gradient * (xend - x0);
        let xgap = 1.0 - (x0 + 0.5).fract();
        let xpxl1 = xend as i64;
        let ypxl1 = yend.floor() as i64;
        plot(xpxl1, ypxl1, (1.0 - yend.fract()) * xgap, self);
        plot(xpxl1, ypxl1 + 1, yend.fract() * xgap, self);
        let mut intery = yend + gradient;

        // second endpoint
        let xend = x1.round();
        let yend = y1 + gradient * (xend - x1);
        let xgap = (x1 + 0.5).fract();
        let xpxl2 = xend as i64;
        let ypxl2 = yend.floor() as i64;
        plot(xpxl2, ypxl2, (1.0 - yend.fract()) * xgap, self);
        plot(xpxl2, ypxl2 + 1, yend.fract() * xgap, self);

        for x in (xpxl1 + 1)..xpxl2 {
            let y = intery.floor() as i64;
            plot(x, y, 1.0 - intery.fract(), self);
            plot(x, y + 1, intery.fract(), self);
            intery += gradient;
        }
    }
}
