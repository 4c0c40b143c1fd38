//! Scene orchestration for detvis
//!
//! This crate ties the geometric core to an external viewer surface:
//! - a [`ViewerSurface`] trait mirroring the usual visualizer lifecycle
//! - a deterministic headless [`RecordingViewer`]
//! - the [`Scene`] state machine accumulating points, box wireframes, and
//!   spatially offset segmentation overlays
//! - one-call entry points for the common draw-points-and-boxes flows

pub mod surface;
pub mod scene;

pub use surface::*;
pub use scene::*;
