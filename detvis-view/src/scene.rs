//! Scene assembly and lifecycle
//!
//! A [`Scene`] owns its viewer surface exclusively and walks a
//! one-directional state machine: `Created` → `Populated` (base points
//! added) → `Decorated` (boxes/overlays added, repeatable) → `Rendered` →
//! `Closed`. The surface is released on every exit path; any operation
//! after `Closed` fails with [`Error::ResourceClosed`].

use crate::surface::{Geometry, GeometryId, ViewerSurface};
use detvis_core::{
    boxes_from_rows, color_points_by_membership, color_points_in_boxes, CenterMode, ColorMode,
    Error, MembershipMatrix, OrientedBox3, Point3f, PointCloud, Result, Rgbf, RotAxis, Vector3,
    YawSign, BOX_EDGES,
};
use detvis_io::{boxes_to_meshes, export_polygon_soup, MeshFormat, TriangleMesh};
use std::path::Path;

/// Scene appearance and convention settings
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub point_size: f32,
    pub point_color: Rgbf,
    pub bbox_color: Rgbf,
    pub in_box_color: Rgbf,
    pub rot_axis: RotAxis,
    pub center_mode: CenterMode,
    pub color_mode: ColorMode,
    /// Yaw sign for geometrically assigned boxes
    pub yaw_sign: YawSign,
    /// Yaw sign for membership-driven boxes; pipelines that precompute
    /// membership typically negate the heading
    pub indexed_yaw_sign: YawSign,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            point_size: 2.0,
            point_color: [0.5, 0.5, 0.5],
            bbox_color: [0.0, 1.0, 0.0],
            in_box_color: [1.0, 0.0, 0.0],
            rot_axis: RotAxis::Z,
            center_mode: CenterMode::LidarBottom,
            color_mode: ColorMode::Xyz,
            yaw_sign: YawSign::Positive,
            indexed_yaw_sign: YawSign::Negative,
        }
    }
}

/// Lifecycle stage of a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Created,
    Populated,
    Decorated,
    Rendered,
    Closed,
}

/// An accumulating 3D scene bound to one viewer surface
pub struct Scene<V: ViewerSurface> {
    viewer: Option<V>,
    config: SceneConfig,
    state: SceneState,
    cloud: PointCloud,
    colors: Vec<Rgbf>,
    boxes: Vec<OrientedBox3>,
    points_id: Option<GeometryId>,
    seg_count: usize,
}

impl<V: ViewerSurface> Scene<V> {
    /// Create a scene on a freshly acquired viewer surface
    ///
    /// Adds the unit coordinate frame at the origin.
    pub fn new(mut viewer: V, config: SceneConfig) -> Result<Self> {
        viewer.set_point_size(config.point_size)?;
        viewer.add_geometry(coordinate_frame(Point3f::origin(), 1.0))?;
        log::debug!("scene created");
        Ok(Self {
            viewer: Some(viewer),
            config,
            state: SceneState::Created,
            cloud: PointCloud::new(),
            colors: Vec::new(),
            boxes: Vec::new(),
            points_id: None,
            seg_count: 0,
        })
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current per-point colors (normalized)
    pub fn point_colors(&self) -> &[Rgbf] {
        &self.colors
    }

    /// Add the base point cloud
    ///
    /// With [`ColorMode::Xyz`] every point takes the uniform point color;
    /// with [`ColorMode::XyzRgb`] the cloud's own colors are used.
    pub fn add_points(&mut self, cloud: PointCloud) -> Result<()> {
        self.ensure_open()?;
        if self.state != SceneState::Created {
            return Err(Error::Visualization(
                "base point cloud already added".to_string(),
            ));
        }
        self.colors = match self.config.color_mode {
            ColorMode::Xyz => vec![self.config.point_color; cloud.len()],
            ColorMode::XyzRgb => cloud
                .colors
                .clone()
                .unwrap_or_else(|| vec![self.config.point_color; cloud.len()]),
        };
        let geometry = Geometry::Points {
            positions: cloud.positions.clone(),
            colors: self.colors.clone(),
        };
        let id = self.viewer_mut()?.add_geometry(geometry)?;
        self.points_id = Some(id);
        self.cloud = cloud;
        self.state = SceneState::Populated;
        log::debug!("scene populated with {} points", self.cloud.len());
        Ok(())
    }

    /// Add boxes from 7-scalar rows, recoloring contained points
    /// geometrically
    pub fn add_boxes(&mut self, rows: &[[f32; 7]]) -> Result<()> {
        let boxes = boxes_from_rows(
            rows,
            self.config.rot_axis,
            self.config.center_mode,
            self.config.yaw_sign,
        );
        self.add_boxes_with(&boxes, None)
    }

    /// Add boxes with explicit color overrides
    pub fn add_boxes_colored(
        &mut self,
        rows: &[[f32; 7]],
        bbox_color: Rgbf,
        in_box_color: Rgbf,
    ) -> Result<()> {
        let boxes = boxes_from_rows(
            rows,
            self.config.rot_axis,
            self.config.center_mode,
            self.config.yaw_sign,
        );
        self.add_boxes_with(&boxes, Some((bbox_color, in_box_color)))
    }

    /// Add boxes whose point membership was precomputed externally
    ///
    /// Membership is a `[num_points, num_boxes]` boolean matrix; the yaw
    /// sign follows `indexed_yaw_sign`.
    pub fn add_boxes_indexed(
        &mut self,
        rows: &[[f32; 7]],
        membership: &MembershipMatrix,
    ) -> Result<()> {
        self.ensure_populated()?;
        if membership.ncols() != rows.len() {
            return Err(Error::shape_mismatch(
                format!("{} membership columns", rows.len()),
                format!("{} membership columns", membership.ncols()),
            ));
        }
        let boxes = boxes_from_rows(
            rows,
            self.config.rot_axis,
            self.config.center_mode,
            self.config.indexed_yaw_sign,
        );
        for bbox in &boxes {
            self.add_wireframe(bbox, self.config.bbox_color)?;
        }
        if self.config.color_mode == ColorMode::Xyz && !boxes.is_empty() {
            color_points_by_membership(&mut self.colors, membership, self.config.in_box_color)?;
            self.push_colors()?;
        }
        self.boxes.extend(boxes);
        self.state = SceneState::Decorated;
        Ok(())
    }

    fn add_boxes_with(
        &mut self,
        boxes: &[OrientedBox3],
        colors: Option<(Rgbf, Rgbf)>,
    ) -> Result<()> {
        self.ensure_populated()?;
        let (bbox_color, in_box_color) =
            colors.unwrap_or((self.config.bbox_color, self.config.in_box_color));
        for bbox in boxes {
            self.add_wireframe(bbox, bbox_color)?;
        }
        // recoloring only applies to uniformly colored clouds; rgb clouds
        // keep their own colors, as the original pipeline does
        if self.config.color_mode == ColorMode::Xyz && !boxes.is_empty() {
            color_points_in_boxes(
                &mut self.colors,
                &self.cloud.positions,
                boxes,
                in_box_color,
            )?;
            self.push_colors()?;
        }
        self.boxes.extend_from_slice(boxes);
        self.state = SceneState::Decorated;
        log::debug!("scene decorated with {} boxes", boxes.len());
        Ok(())
    }

    /// Add a segmentation overlay as an extra colored point group
    ///
    /// Each overlay is translated along x by `1.2 × counter × x-extent` of
    /// the base cloud so successive overlays render beside, not atop, the
    /// scene. The first overlay sits at offset zero; the counter only ever
    /// grows within a scene.
    pub fn add_seg_mask(&mut self, mut overlay: PointCloud) -> Result<()> {
        self.ensure_populated()?;
        let offset = 1.2 * self.seg_count as f32 * self.cloud.extent(RotAxis::X);
        self.seg_count += 1;

        overlay.translate_axis(RotAxis::X, offset);
        let colors = overlay
            .colors
            .clone()
            .unwrap_or_else(|| vec![self.config.point_color; overlay.len()]);
        let frame_origin = Point3f::new(offset, 0.0, 0.0);
        let viewer = self.viewer_mut()?;
        viewer.add_geometry(coordinate_frame(frame_origin, 1.0))?;
        viewer.add_geometry(Geometry::Points {
            positions: overlay.positions,
            colors,
        })?;
        self.state = SceneState::Decorated;
        log::debug!("segment overlay {} at x offset {offset}", self.seg_count);
        Ok(())
    }

    /// Run the blocking event loop and optionally capture a frame
    pub fn show(&mut self, save_path: Option<&Path>) -> Result<()> {
        self.ensure_open()?;
        let viewer = self.viewer_mut()?;
        viewer.run()?;
        if let Some(path) = save_path {
            viewer.capture_image(path)?;
        }
        self.state = SceneState::Rendered;
        Ok(())
    }

    /// Export the scene's points and boxes as one mesh file
    ///
    /// The point cloud becomes a face-less vertex block followed by the
    /// box cuboids; an undecorated scene still writes a degenerate box so
    /// the file opens in downstream viewers.
    pub fn export<P: AsRef<Path>>(&mut self, path: P, format: MeshFormat) -> Result<()> {
        self.ensure_open()?;
        let mut meshes = Vec::with_capacity(self.boxes.len() + 1);
        meshes.push(TriangleMesh {
            vertices: self.cloud.positions.clone(),
            faces: Vec::new(),
            colors: None,
        });
        meshes.extend(boxes_to_meshes(&self.boxes));
        export_polygon_soup(&meshes, path, format)?;
        self.state = SceneState::Rendered;
        Ok(())
    }

    /// Release the viewer surface; the scene accepts no further calls
    pub fn close(&mut self) -> Result<()> {
        let mut viewer = self.viewer.take().ok_or(Error::ResourceClosed)?;
        viewer.destroy()?;
        self.state = SceneState::Closed;
        log::debug!("scene closed");
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == SceneState::Closed || self.viewer.is_none() {
            return Err(Error::ResourceClosed);
        }
        Ok(())
    }

    fn ensure_populated(&self) -> Result<()> {
        self.ensure_open()?;
        match self.state {
            SceneState::Created => Err(Error::Visualization(
                "add the base point cloud before decorating the scene".to_string(),
            )),
            SceneState::Rendered => Err(Error::Visualization(
                "scene already rendered; decoration is one-directional".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn viewer_mut(&mut self) -> Result<&mut V> {
        self.viewer.as_mut().ok_or(Error::ResourceClosed)
    }

    fn add_wireframe(&mut self, bbox: &OrientedBox3, color: Rgbf) -> Result<()> {
        let geometry = Geometry::Lines {
            points: bbox.corners().to_vec(),
            segments: BOX_EDGES.to_vec(),
            colors: vec![color; BOX_EDGES.len()],
        };
        self.viewer_mut()?.add_geometry(geometry)?;
        Ok(())
    }

    fn push_colors(&mut self) -> Result<()> {
        let id = self
            .points_id
            .ok_or_else(|| Error::Visualization("no base point geometry".to_string()))?;
        let geometry = Geometry::Points {
            positions: self.cloud.positions.clone(),
            colors: self.colors.clone(),
        };
        self.viewer_mut()?.update_geometry(id, geometry)
    }
}

impl<V: ViewerSurface> Drop for Scene<V> {
    fn drop(&mut self) {
        // release the surface on early-return and error paths too
        if let Some(mut viewer) = self.viewer.take() {
            let _ = viewer.destroy();
        }
    }
}

/// The unit coordinate frame as a colored line set (x red, y green, z blue)
fn coordinate_frame(origin: Point3f, size: f32) -> Geometry {
    let axes = [
        Vector3::new(size, 0.0, 0.0),
        Vector3::new(0.0, size, 0.0),
        Vector3::new(0.0, 0.0, size),
    ];
    let mut points = vec![origin];
    let mut segments = Vec::new();
    for (i, axis) in axes.into_iter().enumerate() {
        points.push(origin + axis);
        segments.push((0, i + 1));
    }
    Geometry::Lines {
        points,
        segments,
        colors: vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    }
}

/// Draw points and (optionally) boxes in one call
///
/// Builds a scene on the given surface, shows it when asked, captures to
/// `save_path` when given, and closes the surface before returning.
pub fn show_pts_boxes<V: ViewerSurface>(
    viewer: V,
    points: PointCloud,
    boxes: Option<&[[f32; 7]]>,
    show: bool,
    save_path: Option<&Path>,
    config: SceneConfig,
) -> Result<()> {
    let mut scene = Scene::new(viewer, config)?;
    scene.add_points(points)?;
    if let Some(rows) = boxes {
        scene.add_boxes(rows)?;
    }
    if show {
        scene.show(save_path)?;
    } else if let Some(path) = save_path {
        scene.viewer_mut()?.capture_image(path)?;
    }
    scene.close()
}

/// Draw points and boxes whose point membership is precomputed
pub fn show_pts_index_boxes<V: ViewerSurface>(
    viewer: V,
    points: PointCloud,
    boxes: &[[f32; 7]],
    membership: &MembershipMatrix,
    show: bool,
    save_path: Option<&Path>,
    config: SceneConfig,
) -> Result<()> {
    let mut scene = Scene::new(viewer, config)?;
    scene.add_points(points)?;
    scene.add_boxes_indexed(boxes, membership)?;
    if show {
        scene.show(save_path)?;
    } else if let Some(path) = save_path {
        scene.viewer_mut()?.capture_image(path)?;
    }
    scene.close()
}
