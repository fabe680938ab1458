//! Unstructured grid dataset.

use super::CellArray;
use crate::core::{DataArray, DataSetAttributes};
use crate::util::{Error, Result};

/// Linear cell types, numbered as in VTK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CellType {
    Vertex = 1,
    PolyVertex = 2,
    Line = 3,
    PolyLine = 4,
    Triangle = 5,
    TriangleStrip = 6,
    Polygon = 7,
    Pixel = 8,
    Quad = 9,
    Tetra = 10,
    Voxel = 11,
    Hexahedron = 12,
    Wedge = 13,
    Pyramid = 14,
}

impl CellType {
    /// Parse a VTK cell type code.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            1 => Self::Vertex,
            2 => Self::PolyVertex,
            3 => Self::Line,
            4 => Self::PolyLine,
            5 => Self::Triangle,
            6 => Self::TriangleStrip,
            7 => Self::Polygon,
            8 => Self::Pixel,
            9 => Self::Quad,
            10 => Self::Tetra,
            11 => Self::Voxel,
            12 => Self::Hexahedron,
            13 => Self::Wedge,
            14 => Self::Pyramid,
            _ => return None,
        })
    }

    /// Topological dimension of the cell.
    pub const fn dimension(self) -> u8 {
        match self {
            Self::Vertex | Self::PolyVertex => 0,
            Self::Line | Self::PolyLine => 1,
            Self::Triangle | Self::TriangleStrip | Self::Polygon | Self::Pixel | Self::Quad => 2,
            Self::Tetra | Self::Voxel | Self::Hexahedron | Self::Wedge | Self::Pyramid => 3,
        }
    }

    /// Fixed point count, or `None` for variable-size cells.
    pub const fn num_points(self) -> Option<usize> {
        match self {
            Self::Vertex => Some(1),
            Self::Line => Some(2),
            Self::Triangle => Some(3),
            Self::Pixel | Self::Quad | Self::Tetra => Some(4),
            Self::Pyramid => Some(5),
            Self::Wedge => Some(6),
            Self::Voxel | Self::Hexahedron => Some(8),
            Self::PolyVertex | Self::PolyLine | Self::TriangleStrip | Self::Polygon => None,
        }
    }

    /// Boundary faces of a 3D cell as local point indices, outward ordered.
    pub fn faces(self) -> &'static [&'static [usize]] {
        match self {
            Self::Tetra => &[&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]],
            Self::Voxel => &[
                &[0, 4, 6, 2],
                &[1, 3, 7, 5],
                &[0, 1, 5, 4],
                &[2, 6, 7, 3],
                &[0, 2, 3, 1],
                &[4, 5, 7, 6],
            ],
            Self::Hexahedron => &[
                &[0, 4, 7, 3],
                &[1, 2, 6, 5],
                &[0, 1, 5, 4],
                &[3, 7, 6, 2],
                &[0, 3, 2, 1],
                &[4, 5, 6, 7],
            ],
            Self::Wedge => &[
                &[0, 1, 2],
                &[3, 5, 4],
                &[0, 3, 4, 1],
                &[1, 4, 5, 2],
                &[2, 5, 3, 0],
            ],
            Self::Pyramid => &[&[0, 3, 2, 1], &[0, 1, 4], &[1, 2, 4], &[2, 3, 4], &[3, 0, 4]],
            _ => &[],
        }
    }
}

/// Grid of arbitrary linear cells.
#[derive(Clone, Debug, PartialEq)]
pub struct UnstructuredGrid {
    pub points: DataArray,
    pub cells: CellArray,
    pub cell_types: Vec<CellType>,
    pub point_data: DataSetAttributes,
    pub cell_data: DataSetAttributes,
    pub field_data: DataSetAttributes,
}

impl UnstructuredGrid {
    pub fn new(points: DataArray) -> Self {
        Self {
            points,
            cells: CellArray::new(),
            cell_types: Vec::new(),
            point_data: DataSetAttributes::new(),
            cell_data: DataSetAttributes::new(),
            field_data: DataSetAttributes::new(),
        }
    }

    /// Append a cell, checking its point count against its type.
    pub fn push_cell(&mut self, cell_type: CellType, ids: &[i64]) -> Result<()> {
        if let Some(expected) = cell_type.num_points() {
            if ids.len() != expected {
                return Err(Error::invalid(format!(
                    "{:?} cell needs {} points, got {}",
                    cell_type,
                    expected,
                    ids.len()
                )));
            }
        }
        self.cells.push_cell(ids);
        self.cell_types.push(cell_type);
        Ok(())
    }

    pub fn num_points(&self) -> usize {
        self.points.number_of_tuples()
    }

    pub fn num_cells(&self) -> usize {
        self.cell_types.len()
    }

    /// Iterate `(type, point ids)` pairs.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellType, &[i64])> {
        self.cell_types.iter().copied().zip(self.cells.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::points_from_vec3;
    use glam::Vec3;

    #[test]
    fn test_push_cell_checks_size() {
        let mut grid = UnstructuredGrid::new(points_from_vec3(&[Vec3::ZERO; 4]));
        grid.push_cell(CellType::Tetra, &[0, 1, 2, 3]).unwrap();
        assert!(grid.push_cell(CellType::Tetra, &[0, 1, 2]).is_err());
        grid.push_cell(CellType::Polygon, &[0, 1, 2, 3]).unwrap();
        assert_eq!(grid.num_cells(), 2);
        assert_eq!(grid.iter_cells().next().map(|(t, _)| t), Some(CellType::Tetra));
    }

    #[test]
    fn test_face_tables() {
        for t in [CellType::Tetra, CellType::Voxel, CellType::Hexahedron, CellType::Wedge, CellType::Pyramid] {
            let n = t.num_points().unwrap();
            assert!(!t.faces().is_empty());
            assert!(t.faces().iter().flat_map(|f| f.iter()).all(|&i| i < n));
        }
        assert_eq!(CellType::from_code(12), Some(CellType::Hexahedron));
        assert_eq!(CellType::from_code(42), None);
    }
}
