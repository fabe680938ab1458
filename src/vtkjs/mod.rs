//! vtk.js scene archive export.
//!
//! An export runs in two steps:
//! - [`SceneWalker`] visits renderers and writes one dataset directory per
//!   prop (plus texture images) into an [`ArchiveEntries`](crate::core::ArchiveEntries) list
//! - [`pack`] adds the top-level `index.json`, zips the entries and
//!   base64-encodes the result
//!
//! [`Exporter`] bundles both with its options and geometry filter.
//!
//! # Archive layout
//!
//! ```text
//! index.json                 scene description
//! <prop id>/index.json       dataset description
//! <prop id>/data/<md5>       raw array blobs
//! texture_<n>/index.json     texture images, same layout
//! ```

pub mod archive;
pub mod array;
pub mod attributes;
pub mod dataset;
mod options;
pub mod scene;
pub mod schema;

pub use archive::{pack, read_scene, unpack, write_zip, SCENE_INDEX};
pub use array::{byte_order_tag, ArrayWriter, DATA_DIR};
pub use attributes::{AttributeLocation, ColorArrayInfo};
pub use dataset::{write_data_set, write_image_data};
pub use options::ExportOptions;
pub use scene::{ExportedScene, SceneWalker, TextureRegistry, BAKED_COLOR_ARRAY};
pub use schema::{ArrayDescriptor, SceneComponent, SceneDescription};

use crate::geom::{GeometryFilter, SurfaceFilter};
use crate::render::Renderer;
use crate::util::Result;

/// Scene exporter with its options and geometry filter.
pub struct Exporter {
    options: ExportOptions,
    filter: Box<dyn GeometryFilter>,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

impl Exporter {
    /// Exporter using [`SurfaceFilter`] for geometry reduction.
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            filter: Box::new(SurfaceFilter),
        }
    }

    /// Replace the geometry filter.
    pub fn with_filter(mut self, filter: impl GeometryFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Walk `renderers` without packing.
    pub fn walk(&self, renderers: &[Renderer]) -> Result<ExportedScene> {
        SceneWalker::new(&self.options, self.filter.as_ref()).walk(renderers)
    }

    /// Export `renderers` to a base64-encoded zip archive.
    pub fn export(&self, renderers: &[Renderer]) -> Result<String> {
        let ExportedScene { entries, scene } = self.walk(renderers)?;
        pack(entries, &scene)
    }
}
