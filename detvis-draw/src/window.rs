//! Debug window seam for 2D overlays
//!
//! Popping up an on-screen window is external glue, same as the 3D viewer
//! surface. Overlay callers that want a quick look at the canvas go
//! through this trait; headless pipelines use [`HeadlessWindow`] and save
//! the canvas to a file instead.

use crate::canvas::Canvas;
use detvis_core::Result;

/// A window that can display a canvas and wait for a key press
pub trait CanvasWindow {
    /// Show the canvas under the given window name
    fn show(&mut self, canvas: &Canvas, name: &str) -> Result<()>;

    /// Block until a key press or until `timeout_ms` elapses (0 = forever)
    fn wait_key(&mut self, timeout_ms: u64) -> Result<()>;
}

/// Window that drops frames; useful on machines without a display
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    pub shown: usize,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CanvasWindow for HeadlessWindow {
    fn show(&mut self, canvas: &Canvas, name: &str) -> Result<()> {
        log::debug!(
            "headless window {name:?}: dropping {}x{} frame",
            canvas.width(),
            canvas.height()
        );
        self.shown += 1;
        Ok(())
    }

    fn wait_key(&mut self, _timeout_ms: u64) -> Result<()> {
        Ok(())
    }
}

/// Show a canvas and wait, in one call
pub fn present(canvas: &Canvas, window: &mut dyn CanvasWindow, name: &str, wait_ms: u64) -> Result<()> {
    window.show(canvas, name)?;
    window.wait_key(wait_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_window_counts_frames() {
        let canvas = Canvas::new(8, 8);
        let mut window = HeadlessWindow::new();
        present(&canvas, &mut window, "debug", 100).unwrap();
        present(&canvas, &mut window, "debug", 0).unwrap();
        assert_eq!(window.shown, 2);
    }
}
