//! Mesh export for detvis
//!
//! Converts point clouds and oriented boxes into polygon soup and writes
//! OBJ or ASCII PLY files for offline inspection (e.g. in MeshLab). Parent
//! directories of output paths are created automatically.

pub mod mesh;
pub mod obj;
pub mod ply;
pub mod export;

pub use mesh::*;
pub use obj::*;
pub use ply::*;
pub use export::*;

use detvis_core::{Error, Result};
use std::path::Path;
use std::str::FromStr;

/// Supported mesh export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Ply,
}

impl MeshFormat {
    /// Detect the format from a path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some(ext) => ext.parse(),
            None => Err(Error::UnsupportedFormat(format!(
                "no extension on {:?}",
                path.as_ref()
            ))),
        }
    }
}

impl FromStr for MeshFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "obj" => Ok(MeshFormat::Obj),
            "ply" => Ok(MeshFormat::Ply),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}
