//! The viewer surface seam
//!
//! Interactive windowing is an external collaborator, not core logic. The
//! scene talks to it through [`ViewerSurface`], which mirrors the usual
//! visualizer lifecycle (create window, add/update geometry, run the
//! blocking event loop, capture a frame, destroy). The shipped
//! [`RecordingViewer`] is a deterministic headless implementation used by
//! tests and offline pipelines; a windowed backend implements the same
//! trait.

use detvis_core::{Point3f, Result, Rgbf};
use std::path::{Path, PathBuf};

/// Renderable geometry handed to the viewer
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A point set with one color per point (channels in `[0, 1]`)
    Points {
        positions: Vec<Point3f>,
        colors: Vec<Rgbf>,
    },
    /// A line set: indexed segments with one color per segment
    Lines {
        points: Vec<Point3f>,
        segments: Vec<(usize, usize)>,
        colors: Vec<Rgbf>,
    },
}

/// Handle for geometry added to a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryId(pub usize);

/// Surface the scene renders through
pub trait ViewerSurface {
    /// Set the rendered point size; backends without the option may ignore it
    fn set_point_size(&mut self, _size: f32) -> Result<()> {
        Ok(())
    }

    /// Add geometry, returning a handle for later updates
    fn add_geometry(&mut self, geometry: Geometry) -> Result<GeometryId>;

    /// Replace previously added geometry
    fn update_geometry(&mut self, id: GeometryId, geometry: Geometry) -> Result<()>;

    /// Run the blocking interactive event loop until the viewer closes
    fn run(&mut self) -> Result<()>;

    /// Capture the current frame to an image file
    fn capture_image(&mut self, path: &Path) -> Result<()>;

    /// Release the window and any associated resources
    fn destroy(&mut self) -> Result<()>;
}

impl<T: ViewerSurface + ?Sized> ViewerSurface for &mut T {
    fn set_point_size(&mut self, size: f32) -> Result<()> {
        (**self).set_point_size(size)
    }

    fn add_geometry(&mut self, geometry: Geometry) -> Result<GeometryId> {
        (**self).add_geometry(geometry)
    }

    fn update_geometry(&mut self, id: GeometryId, geometry: Geometry) -> Result<()> {
        (**self).update_geometry(id, geometry)
    }

    fn run(&mut self) -> Result<()> {
        (**self).run()
    }

    fn capture_image(&mut self, path: &Path) -> Result<()> {
        (**self).capture_image(path)
    }

    fn destroy(&mut self) -> Result<()> {
        (**self).destroy()
    }
}

/// Headless viewer that records every call instead of rendering
#[derive(Debug, Default)]
pub struct RecordingViewer {
    pub geometries: Vec<Geometry>,
    pub point_size: Option<f32>,
    pub updates: usize,
    pub runs: usize,
    pub captures: Vec<PathBuf>,
    pub destroyed: bool,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded point-set geometries
    pub fn point_sets(&self) -> usize {
        self.geometries
            .iter()
            .filter(|g| matches!(g, Geometry::Points { .. }))
            .count()
    }

    /// Count recorded line-set geometries
    pub fn line_sets(&self) -> usize {
        self.geometries
            .iter()
            .filter(|g| matches!(g, Geometry::Lines { .. }))
            .count()
    }
}

impl ViewerSurface for RecordingViewer {
    fn set_point_size(&mut self, size: f32) -> Result<()> {
        self.point_size = Some(size);
        Ok(())
    }

    fn add_geometry(&mut self, geometry: Geometry) -> Result<GeometryId> {
        self.geometries.push(geometry);
        Ok(GeometryId(self.geometries.len() - 1))
    }

    fn update_geometry(&mut self, id: GeometryId, geometry: Geometry) -> Result<()> {
        let slot = self.geometries.get_mut(id.0).ok_or_else(|| {
            detvis_core::Error::Visualization(format!("unknown geometry id {}", id.0))
        })?;
        *slot = geometry;
        self.updates += 1;
        Ok(())
    }

    fn run(&mut self) -> Result<()> {
        // nothing to block on headlessly
        self.runs += 1;
        Ok(())
    }

    fn capture_image(&mut self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::File::create(path)?;
        self.captures.push(path.to_path_buf());
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        log::debug!("recording viewer destroyed after {} geometries", self.geometries.len());
        self.destroyed = true;
        Ok(())
    }
}
