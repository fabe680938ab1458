//! Reduction of non-polygonal datasets to polygonal meshes.
//!
//! The exporter only writes polygonal meshes and images. Unstructured grids
//! and multi-block composites go through a [`GeometryFilter`] first. The
//! default [`SurfaceFilter`] keeps lower-dimensional cells as they are and
//! replaces 3D cells with the faces on the outer boundary.

use std::collections::HashMap;

use smallvec::SmallVec;

use super::{CellArray, CellType, DataObject, MultiBlock, PolyData, UnstructuredGrid};
use crate::core::DataSetAttributes;

/// Geometry reduction capability used by the exporter.
pub trait GeometryFilter {
    /// Reduce an unstructured grid to its polygonal boundary.
    fn unstructured_to_poly(&self, grid: &UnstructuredGrid) -> PolyData;

    /// Merge every block of a composite into a single mesh.
    fn composite_to_poly(&self, composite: &MultiBlock) -> PolyData;
}

/// Default boundary-extracting [`GeometryFilter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceFilter;

type FaceKey = SmallVec<[i64; 4]>;

impl GeometryFilter for SurfaceFilter {
    fn unstructured_to_poly(&self, grid: &UnstructuredGrid) -> PolyData {
        let mut verts = Slot::default();
        let mut lines = Slot::default();
        let mut polys = Slot::default();
        let mut strips = Slot::default();

        let mut faces: Vec<(FaceKey, FaceKey, usize)> = Vec::new();
        let mut face_uses: HashMap<FaceKey, usize> = HashMap::new();

        for (cell_id, (cell_type, ids)) in grid.iter_cells().enumerate() {
            if cell_type.num_points().is_some_and(|n| n != ids.len()) {
                tracing::warn!("{:?} cell {} has {} points, skipping", cell_type, cell_id, ids.len());
                continue;
            }
            match cell_type {
                CellType::Vertex | CellType::PolyVertex => verts.push(ids, cell_id),
                CellType::Line | CellType::PolyLine => lines.push(ids, cell_id),
                CellType::TriangleStrip => strips.push(ids, cell_id),
                // pixel points run in grid order, not around the boundary
                CellType::Pixel => polys.push(&[ids[0], ids[1], ids[3], ids[2]], cell_id),
                CellType::Triangle | CellType::Polygon | CellType::Quad => polys.push(ids, cell_id),
                CellType::Tetra
                | CellType::Voxel
                | CellType::Hexahedron
                | CellType::Wedge
                | CellType::Pyramid => {
                    for local in cell_type.faces() {
                        let face: FaceKey = local.iter().map(|&i| ids[i]).collect();
                        let mut key = face.clone();
                        key.sort_unstable();
                        *face_uses.entry(key.clone()).or_insert(0) += 1;
                        faces.push((face, key, cell_id));
                    }
                }
            }
        }

        for (face, key, cell_id) in &faces {
            if face_uses.get(key) == Some(&1) {
                polys.push(face, *cell_id);
            }
        }

        let source_cells: Vec<usize> = [&verts, &lines, &polys, &strips]
            .iter()
            .flat_map(|slot| slot.sources.iter().copied())
            .collect();

        PolyData {
            points: grid.points.clone(),
            verts: verts.into_cells(),
            lines: lines.into_cells(),
            polys: polys.into_cells(),
            strips: strips.into_cells(),
            point_data: grid.point_data.clone(),
            cell_data: grid
                .cell_data
                .with_tuple_count(grid.num_cells())
                .gather(&source_cells),
            field_data: DataSetAttributes::new(),
        }
    }

    fn composite_to_poly(&self, composite: &MultiBlock) -> PolyData {
        let mut parts = Vec::new();
        self.collect_blocks(composite, &mut parts);
        append_poly_data(&parts)
    }
}

impl SurfaceFilter {
    fn collect_blocks(&self, composite: &MultiBlock, out: &mut Vec<PolyData>) {
        for block in &composite.blocks {
            match block {
                DataObject::PolyData(poly) => out.push(poly.clone()),
                DataObject::UnstructuredGrid(grid) => out.push(self.unstructured_to_poly(grid)),
                DataObject::MultiBlock(nested) => self.collect_blocks(nested, out),
                other => {
                    tracing::warn!("{} block cannot be merged into a mesh, skipping", other.class_name());
                }
            }
        }
    }
}

/// One topology slot being built, with the source cell of every entry.
#[derive(Default)]
struct Slot {
    cells: CellArray,
    sources: Vec<usize>,
}

impl Slot {
    fn push(&mut self, ids: &[i64], source: usize) {
        self.cells.push_cell(ids);
        self.sources.push(source);
    }

    fn into_cells(self) -> Option<CellArray> {
        (!self.cells.is_empty()).then_some(self.cells)
    }
}

/// Concatenate meshes into one.
///
/// Point ids are offset per input, cells stay grouped by slot (all verts,
/// then all lines, ...) and only attribute arrays shared by every input are
/// kept.
pub fn append_poly_data(parts: &[PolyData]) -> PolyData {
    let Some(first) = parts.first() else {
        return PolyData::default();
    };

    let same_kind = parts.iter().all(|p| p.points.is_compatible(&first.points));
    let mut points = if same_kind {
        first.points.clone()
    } else {
        first.points.to_float64()
    };
    let mut kept = vec![first];
    for part in &parts[1..] {
        let next = if same_kind {
            part.points.clone()
        } else {
            part.points.to_float64()
        };
        match points.append(&next) {
            Ok(()) => kept.push(part),
            Err(err) => tracing::warn!("skipping block: {}", err),
        }
    }

    let mut offsets = Vec::with_capacity(kept.len());
    let mut total = 0i64;
    for part in &kept {
        offsets.push(total);
        total += part.num_points() as i64;
    }

    let cell_data: Vec<DataSetAttributes> = kept
        .iter()
        .map(|part| part.cell_data.with_tuple_count(part.num_cells()))
        .collect();

    let mut slots: [Option<CellArray>; 4] = Default::default();
    let mut cell_pieces = Vec::new();
    for slot in 0..4 {
        let mut merged = CellArray::new();
        for ((part, offset), part_cell_data) in kept.iter().zip(&offsets).zip(&cell_data) {
            let topology = part.topology();
            let first_cell: usize = topology[..slot]
                .iter()
                .filter_map(|(_, cells)| *cells)
                .map(CellArray::num_cells)
                .sum();
            let mut local = Vec::new();
            if let Some(cells) = topology[slot].1 {
                for (i, ids) in cells.iter().enumerate() {
                    let shifted: SmallVec<[i64; 8]> = ids.iter().map(|id| id + offset).collect();
                    merged.push_cell(&shifted);
                    local.push(first_cell + i);
                }
            }
            cell_pieces.push(part_cell_data.gather(&local));
        }
        slots[slot] = (!merged.is_empty()).then_some(merged);
    }

    let point_parts: Vec<&DataSetAttributes> = kept.iter().map(|p| &p.point_data).collect();
    let cell_parts: Vec<&DataSetAttributes> = cell_pieces.iter().collect();
    let [verts, lines, polys, strips] = slots;

    PolyData {
        points,
        verts,
        lines,
        polys,
        strips,
        point_data: DataSetAttributes::append_all(&point_parts),
        cell_data: DataSetAttributes::append_all(&cell_parts),
        field_data: DataSetAttributes::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataArray;
    use crate::geom::{points_from_vec3, ImageData};
    use glam::Vec3;

    fn cube_points() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for z in 0..3 {
            for y in 0..2 {
                for x in 0..2 {
                    pts.push(Vec3::new(x as f32, y as f32, z as f32));
                }
            }
        }
        pts
    }

    #[test]
    fn test_two_stacked_hexes_share_a_face() {
        let mut grid = UnstructuredGrid::new(points_from_vec3(&cube_points()));
        // hexahedron ordering: bottom quad then top quad
        grid.push_cell(CellType::Hexahedron, &[0, 1, 3, 2, 4, 5, 7, 6]).unwrap();
        grid.push_cell(CellType::Hexahedron, &[4, 5, 7, 6, 8, 9, 11, 10]).unwrap();
        grid.cell_data.set_scalars(DataArray::scalars("id", vec![10i32, 20]));

        let poly = SurfaceFilter.unstructured_to_poly(&grid);
        let polys = poly.polys.as_ref().unwrap();
        assert_eq!(polys.num_cells(), 10);
        assert!(poly.verts.is_none());
        assert_eq!(poly.num_points(), 12);

        let ids = poly.cell_data.scalars().unwrap();
        assert_eq!(ids.number_of_tuples(), 10);
        assert_eq!(ids.component(0, 0), 10.0);
        assert_eq!(ids.component(9, 0), 20.0);
    }

    #[test]
    fn test_lower_dimensional_cells_pass_through() {
        let mut grid = UnstructuredGrid::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE]));
        grid.push_cell(CellType::Vertex, &[0]).unwrap();
        grid.push_cell(CellType::Line, &[0, 1]).unwrap();
        grid.push_cell(CellType::Pixel, &[0, 1, 2, 3]).unwrap();
        grid.cell_data.add_array(DataArray::scalars("c", vec![1.0f32, 2.0, 3.0]));

        let poly = SurfaceFilter.unstructured_to_poly(&grid);
        assert_eq!(poly.verts.as_ref().map(CellArray::num_cells), Some(1));
        assert_eq!(poly.lines.as_ref().map(CellArray::num_cells), Some(1));
        assert_eq!(poly.polys.as_ref().unwrap().data(), &[4i64, 0, 1, 3, 2][..]);
        assert!(poly.strips.is_none());
        assert_eq!(poly.cell_data.get_by_name("c").unwrap().number_of_tuples(), 3);
    }

    #[test]
    fn test_composite_append_offsets_ids() {
        let tri = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        let composite = MultiBlock {
            blocks: vec![
                DataObject::PolyData(tri.clone()),
                DataObject::ImageData(ImageData::with_dimensions([2, 2, 2])),
                DataObject::MultiBlock(MultiBlock {
                    blocks: vec![DataObject::PolyData(tri)],
                }),
            ],
        };

        let merged = SurfaceFilter.composite_to_poly(&composite);
        assert_eq!(merged.num_points(), 6);
        assert_eq!(merged.polys.as_ref().unwrap().data(), &[3i64, 0, 1, 2, 3, 3, 4, 5][..]);
    }

    #[test]
    fn test_append_nothing() {
        assert_eq!(append_poly_data(&[]).num_points(), 0);
    }

    #[test]
    fn test_mismatched_cell_array_is_dropped() {
        let mut grid = UnstructuredGrid::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z]));
        grid.push_cell(CellType::Tetra, &[0, 1, 2, 3]).unwrap();
        grid.cell_data.set_scalars(DataArray::scalars("c", Vec::<f32>::new()));
        grid.cell_data.add_array(DataArray::scalars("ok", vec![7i32]));

        let poly = SurfaceFilter.unstructured_to_poly(&grid);
        assert_eq!(poly.polys.as_ref().map(CellArray::num_cells), Some(4));
        assert!(poly.cell_data.get_by_name("c").is_none());
        assert!(poly.cell_data.scalars().is_none());
        assert_eq!(poly.cell_data.get_by_name("ok").map(DataArray::number_of_tuples), Some(4));
    }

    #[test]
    fn test_cells_with_wrong_point_count_are_skipped() {
        let mut grid = UnstructuredGrid::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE]));
        grid.cells.push_cell(&[0, 1, 2]);
        grid.cell_types.push(CellType::Pixel);
        grid.cells.push_cell(&[0, 1]);
        grid.cell_types.push(CellType::Hexahedron);
        grid.push_cell(CellType::Triangle, &[1, 2, 3]).unwrap();
        grid.cell_data.add_array(DataArray::scalars("c", vec![1i32, 2, 3]));

        let poly = SurfaceFilter.unstructured_to_poly(&grid);
        assert_eq!(poly.polys.as_ref().unwrap().data(), &[3i64, 1, 2, 3][..]);
        let c = poly.cell_data.get_by_name("c").unwrap();
        assert_eq!(c.number_of_tuples(), 1);
        assert_eq!(c.component(0, 0), 3.0);
    }

    #[test]
    fn test_composite_with_short_cell_array() {
        let mut bad = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        bad.cell_data.add_array(DataArray::scalars("c", Vec::<f32>::new()));
        let good = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        let composite = MultiBlock {
            blocks: vec![DataObject::PolyData(bad), DataObject::PolyData(good)],
        };

        let merged = SurfaceFilter.composite_to_poly(&composite);
        assert_eq!(merged.num_cells(), 2);
        assert!(merged.cell_data.is_empty());
    }

    #[test]
    fn test_block_with_unappendable_points_is_skipped() {
        let tri = PolyData::new(points_from_vec3(&[Vec3::ZERO, Vec3::X, Vec3::Y]))
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));
        let flat = PolyData::new(DataArray::unnamed(2, vec![0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0]).unwrap())
            .with_polys(CellArray::from_cells([[0i64, 1, 2]]));

        let merged = append_poly_data(&[tri.clone(), flat, tri]);
        assert_eq!(merged.num_points(), 6);
        assert_eq!(merged.polys.as_ref().unwrap().data(), &[3i64, 0, 1, 2, 3, 3, 4, 5][..]);
    }
}
