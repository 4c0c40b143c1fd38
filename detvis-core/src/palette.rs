//! Depth color palette for point-on-image overlays
//!
//! An explicit 256-entry cyclic hue table constructed once and passed by
//! value, replacing any global colormap state. Depth maps to a palette
//! index via `clamp(round(max_distance * 10 / depth), 0, 255)`, so nearer
//! points cycle faster through the hues.

use serde::{Deserialize, Serialize};

/// A fixed 256-entry RGB palette, channels in 0-255
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthPalette {
    entries: Vec<[u8; 3]>,
}

impl DepthPalette {
    /// Build the cyclic 256-hue palette (full saturation and value)
    pub fn hsv_cycle() -> Self {
        let entries = (0..256)
            .map(|i| hue_to_rgb(i as f32 / 256.0 * 360.0))
            .collect();
        Self { entries }
    }

    /// Look up an entry by index, clamped into range
    pub fn entry(&self, index: usize) -> [u8; 3] {
        self.entries[index.min(self.entries.len() - 1)]
    }

    /// The overlay color for a point at `depth`, given the scene's maximum
    /// expected distance
    pub fn color_for_depth(&self, depth: f32, max_distance: f32) -> [u8; 3] {
        let index = (max_distance * 10.0 / depth).round().clamp(0.0, 255.0) as usize;
        self.entry(index)
    }
}

impl Default for DepthPalette {
    fn default() -> Self {
        Self::hsv_cycle()
    }
}

// Standard HSV sector conversion at s = v = 1.
fn hue_to_rgb(hue_deg: f32) -> [u8; 3] {
    let h = hue_deg.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    ]
}
