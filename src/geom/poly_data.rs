//! Polygonal mesh dataset.

use glam::Vec3;

use super::CellArray;
use crate::core::{ArrayValues, DataArray, DataSetAttributes};

/// Polygonal mesh: points plus up to four topology lists.
#[derive(Clone, Debug, PartialEq)]
pub struct PolyData {
    /// Point coordinates, three components per tuple.
    pub points: DataArray,
    pub verts: Option<CellArray>,
    pub lines: Option<CellArray>,
    pub polys: Option<CellArray>,
    pub strips: Option<CellArray>,
    pub point_data: DataSetAttributes,
    pub cell_data: DataSetAttributes,
    pub field_data: DataSetAttributes,
}

impl Default for PolyData {
    fn default() -> Self {
        Self::new(points_from_vec3(&[]))
    }
}

impl PolyData {
    /// Mesh with the given points and no cells.
    pub fn new(points: DataArray) -> Self {
        Self {
            points,
            verts: None,
            lines: None,
            polys: None,
            strips: None,
            point_data: DataSetAttributes::new(),
            cell_data: DataSetAttributes::new(),
            field_data: DataSetAttributes::new(),
        }
    }

    pub fn with_verts(mut self, verts: CellArray) -> Self {
        self.verts = Some(verts);
        self
    }

    pub fn with_lines(mut self, lines: CellArray) -> Self {
        self.lines = Some(lines);
        self
    }

    pub fn with_polys(mut self, polys: CellArray) -> Self {
        self.polys = Some(polys);
        self
    }

    pub fn with_strips(mut self, strips: CellArray) -> Self {
        self.strips = Some(strips);
        self
    }

    pub fn num_points(&self) -> usize {
        self.points.number_of_tuples()
    }

    /// Topology slots in cell-id order: verts, lines, polys, strips.
    pub fn topology(&self) -> [(&'static str, Option<&CellArray>); 4] {
        [
            ("verts", self.verts.as_ref()),
            ("lines", self.lines.as_ref()),
            ("polys", self.polys.as_ref()),
            ("strips", self.strips.as_ref()),
        ]
    }

    /// Total number of cells across all topology slots.
    pub fn num_cells(&self) -> usize {
        self.topology()
            .iter()
            .filter_map(|(_, cells)| *cells)
            .map(CellArray::num_cells)
            .sum()
    }
}

/// Float32 point array from glam vectors.
pub fn points_from_vec3(points: &[Vec3]) -> DataArray {
    let flat: &[f32] = bytemuck::cast_slice(points);
    DataArray::from_parts(None, 3, ArrayValues::Float32(flat.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle() {
        let mesh = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        assert_eq!(mesh.num_points(), 3);
        assert_eq!(mesh.num_cells(), 1);
        assert_eq!(mesh.points.as_bytes().len(), 36);
    }

    #[test]
    fn test_default_is_empty() {
        let mesh = PolyData::default();
        assert_eq!(mesh.num_points(), 0);
        assert_eq!(mesh.points.number_of_components(), 3);
    }
}
