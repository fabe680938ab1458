//! # vtkjs-export
//!
//! Serializes VTK-style scenes (renderers holding props, each drawing a
//! dataset) into the zipped, base64-encoded scene archive that vtk.js
//! loads in a browser.
//!
//! ## Modules
//!
//! - [`util`] - Data types, math helpers, errors
//! - [`core`] - Data arrays, attribute collections, archive entries
//! - [`geom`] - Datasets (poly data, unstructured grids, images, composites)
//! - [`render`] - Renderers, props, mappers, lookup tables
//! - [`vtkjs`] - Scene walking, dataset serialization and archive packing
//!
//! ## Example
//!
//! ```ignore
//! use vtkjs_export::prelude::*;
//!
//! let mesh = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
//!     .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
//! let renderer = Renderer::new().with_prop(Prop::actor(Mapper::new(mesh)));
//!
//! let archive = export_renderers(&[renderer])?;
//! ```

pub mod util;
pub mod core;
pub mod geom;
pub mod render;
pub mod vtkjs;

// Re-export commonly used types
pub use util::{DataType, Error, Result};
pub use vtkjs::{ExportOptions, Exporter};

use render::Renderer;

/// Export `renderers` with default options to a base64-encoded vtk.js
/// scene archive.
pub fn export_renderers(renderers: &[Renderer]) -> Result<String> {
    Exporter::default().export(renderers)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{DataType, Error, Result, Vec3};
    pub use crate::core::{ArrayRef, DataArray, DataSetAttributes};
    pub use crate::geom::*;
    pub use crate::render::*;
    pub use crate::vtkjs::{unpack, ExportOptions, Exporter};
    pub use crate::export_renderers;
}
