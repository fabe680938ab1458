//! Source-side datasets.
//!
//! This module provides the dataset shapes a scene can feed the exporter:
//! - [`PolyData`] - Polygonal meshes and point clouds
//! - [`UnstructuredGrid`] - Arbitrary linear cells
//! - [`ImageData`] - Regular images and volumes
//! - [`MultiBlock`] - Composites of the above
//!
//! [`DataObject`] is the closed union of these shapes, with an explicit
//! variant for dataset classes the exporter cannot write.

mod cell_array;
mod filter;
mod image_data;
mod poly_data;
mod unstructured_grid;

pub use cell_array::{CellArray, CellIter};
pub use filter::{append_poly_data, GeometryFilter, SurfaceFilter};
pub use image_data::ImageData;
pub use poly_data::{points_from_vec3, PolyData};
pub use unstructured_grid::{CellType, UnstructuredGrid};

use crate::core::DataSetAttributes;

/// Composite dataset grouping several sub-datasets as blocks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultiBlock {
    pub blocks: Vec<DataObject>,
}

impl MultiBlock {
    pub fn new(blocks: Vec<DataObject>) -> Self {
        Self { blocks }
    }

    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
}

/// A dataset of a class the exporter has no writer for.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedDataSet {
    /// Toolkit class name, reported in diagnostics.
    pub class_name: String,
    pub num_points: usize,
}

/// Any dataset a mapper can take as input.
#[derive(Clone, Debug, PartialEq)]
pub enum DataObject {
    PolyData(PolyData),
    UnstructuredGrid(UnstructuredGrid),
    ImageData(ImageData),
    MultiBlock(MultiBlock),
    Unsupported(UnsupportedDataSet),
}

impl DataObject {
    /// Toolkit class name of the dataset.
    pub fn class_name(&self) -> &str {
        match self {
            Self::PolyData(_) => "vtkPolyData",
            Self::UnstructuredGrid(_) => "vtkUnstructuredGrid",
            Self::ImageData(_) => "vtkImageData",
            Self::MultiBlock(_) => "vtkMultiBlockDataSet",
            Self::Unsupported(u) => &u.class_name,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::MultiBlock(_))
    }

    /// Number of points. Composites report zero: they have no geometry of
    /// their own.
    pub fn num_points(&self) -> usize {
        match self {
            Self::PolyData(p) => p.num_points(),
            Self::UnstructuredGrid(g) => g.num_points(),
            Self::ImageData(i) => i.num_points(),
            Self::MultiBlock(_) => 0,
            Self::Unsupported(u) => u.num_points,
        }
    }

    pub fn point_data(&self) -> Option<&DataSetAttributes> {
        match self {
            Self::PolyData(p) => Some(&p.point_data),
            Self::UnstructuredGrid(g) => Some(&g.point_data),
            Self::ImageData(i) => Some(&i.point_data),
            Self::MultiBlock(_) | Self::Unsupported(_) => None,
        }
    }

    pub fn cell_data(&self) -> Option<&DataSetAttributes> {
        match self {
            Self::PolyData(p) => Some(&p.cell_data),
            Self::UnstructuredGrid(g) => Some(&g.cell_data),
            Self::ImageData(i) => Some(&i.cell_data),
            Self::MultiBlock(_) | Self::Unsupported(_) => None,
        }
    }
}

impl From<PolyData> for DataObject {
    fn from(v: PolyData) -> Self {
        Self::PolyData(v)
    }
}

impl From<UnstructuredGrid> for DataObject {
    fn from(v: UnstructuredGrid) -> Self {
        Self::UnstructuredGrid(v)
    }
}

impl From<ImageData> for DataObject {
    fn from(v: ImageData) -> Self {
        Self::ImageData(v)
    }
}

impl From<MultiBlock> for DataObject {
    fn from(v: MultiBlock) -> Self {
        Self::MultiBlock(v)
    }
}
