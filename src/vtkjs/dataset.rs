//! Dataset writers.
//!
//! Each dataset becomes a directory named after its component: a `data/`
//! folder of blobs and an `index.json` describing them.

use super::array::ArrayWriter;
use super::attributes::{dump_all_arrays, dump_color_array, dump_tcoords, ColorArrayInfo};
use super::schema::{
    to_json_pretty, ArrayDescriptor, DatasetBody, DatasetIndex, DatasetMetadata, ImageDataBody, PolyDataBody,
    VTK_CELL_ARRAY, VTK_POINTS,
};
use super::ExportOptions;
use crate::core::ArchiveEntries;
use crate::geom::{DataObject, GeometryFilter, ImageData, PolyData};
use crate::util::Result;

/// Indent of dataset `index.json` files.
const DATASET_INDENT: &[u8] = b"  ";

/// Describe a polygonal mesh, writing its blobs.
///
/// Points are always written; each topology slot only when non-empty. The
/// point and cell data hold the color array and the texture coordinates.
pub fn dump_poly_data(writer: &mut ArrayWriter<'_>, poly: &PolyData, color: &ColorArrayInfo) -> Result<PolyDataBody> {
    let mut points = writer.dump(&poly.points)?;
    points.vtk_class = VTK_POINTS.to_string();

    let mut topology: [Option<ArrayDescriptor>; 4] = Default::default();
    for (slot, (_, cells)) in topology.iter_mut().zip(poly.topology()) {
        if let Some(cells) = cells.filter(|c| !c.is_empty()) {
            let mut desc = writer.dump(&cells.to_data_array())?;
            desc.vtk_class = VTK_CELL_ARRAY.to_string();
            *slot = Some(desc);
        }
    }
    let [verts, lines, polys, strips] = topology;

    let mut attributes = dump_color_array(writer, color)?;
    dump_tcoords(writer, &poly.point_data, &mut attributes.point_data)?;

    Ok(PolyDataBody {
        points,
        verts,
        lines,
        polys,
        strips,
        attributes,
    })
}

/// Describe a regular image, writing its blobs.
pub fn dump_image_data(writer: &mut ArrayWriter<'_>, image: &ImageData) -> Result<ImageDataBody> {
    let attributes = dump_all_arrays(writer, &image.point_data, &image.cell_data)?;
    Ok(ImageDataBody {
        spacing: image.spacing,
        origin: image.origin,
        extent: image.extent,
        attributes,
    })
}

fn write_index(entries: &mut ArchiveEntries, name: &str, body: DatasetBody) -> Result<()> {
    let index = DatasetIndex {
        metadata: DatasetMetadata { name: name.to_string() },
        body,
    };
    let json = to_json_pretty(&index, DATASET_INDENT)?;
    entries.push_file(format!("{}/index.json", name), json);
    Ok(())
}

/// Write `dataset` under the directory `name`.
///
/// Unstructured grids are reduced to polygonal meshes with `filter` first.
/// Returns `Ok(false)` when the dataset class has no writer; nothing is
/// written in that case.
pub fn write_data_set(
    entries: &mut ArchiveEntries,
    dataset: &DataObject,
    color: &ColorArrayInfo,
    name: &str,
    filter: &dyn GeometryFilter,
    options: &ExportOptions,
) -> Result<bool> {
    let body = {
        let mut writer = ArrayWriter::new(entries, name, options);
        match dataset {
            DataObject::PolyData(poly) => DatasetBody::PolyData(dump_poly_data(&mut writer, poly, color)?),
            DataObject::UnstructuredGrid(grid) => {
                let poly = filter.unstructured_to_poly(grid);
                tracing::debug!(
                    "{}: unstructured grid reduced to {} surface cells",
                    name,
                    poly.num_cells()
                );
                DatasetBody::PolyData(dump_poly_data(&mut writer, &poly, color)?)
            }
            DataObject::ImageData(image) => DatasetBody::ImageData(dump_image_data(&mut writer, image)?),
            DataObject::MultiBlock(_) | DataObject::Unsupported(_) => {
                tracing::warn!("{} is not supported, skipping {}", dataset.class_name(), name);
                return Ok(false);
            }
        }
    };
    write_index(entries, name, body)?;
    Ok(true)
}

/// Write a texture image under the directory `name`.
pub fn write_image_data(
    entries: &mut ArchiveEntries,
    image: &ImageData,
    name: &str,
    options: &ExportOptions,
) -> Result<()> {
    let body = {
        let mut writer = ArrayWriter::new(entries, name, options);
        DatasetBody::ImageData(dump_image_data(&mut writer, image)?)
    };
    write_index(entries, name, body)
}
