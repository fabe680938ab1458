//! Attribute container dumpers.
//!
//! Two flavours exist. Polygonal meshes only carry the baked color array
//! (plus texture coordinates). Images carry every point and cell array,
//! then their texture coordinates and normals.

use super::array::ArrayWriter;
use super::schema::{AttributeSet, DatasetAttributes};
use crate::core::{DataArray, DataSetAttributes};
use crate::util::Result;

/// Attribute container a color array is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeLocation {
    PointData,
    CellData,
}

/// Color array resolved for a prop, if any, and where it belongs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorArrayInfo {
    pub color_array: Option<DataArray>,
    pub location: Option<AttributeLocation>,
}

impl ColorArrayInfo {
    /// No color array.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(color_array: DataArray, location: AttributeLocation) -> Self {
        Self {
            color_array: Some(color_array),
            location: Some(location),
        }
    }
}

/// Containers holding only the color array, as active scalars of its
/// location.
pub fn dump_color_array(writer: &mut ArrayWriter<'_>, color: &ColorArrayInfo) -> Result<DatasetAttributes> {
    let mut out = DatasetAttributes::default();
    if let Some(array) = &color.color_array {
        let target = match color.location {
            Some(AttributeLocation::PointData) => &mut out.point_data,
            Some(AttributeLocation::CellData) => &mut out.cell_data,
            None => {
                tracing::debug!("color array without a location, dropped");
                return Ok(out);
            }
        };
        let desc = writer.dump(array)?;
        target.active_scalars = target.push(desc);
    }
    Ok(out)
}

/// Append the texture coordinates of `source` and make them active.
pub fn dump_tcoords(writer: &mut ArrayWriter<'_>, source: &DataSetAttributes, target: &mut AttributeSet) -> Result<()> {
    if let Some(desc) = writer.dump_optional(source.tcoords())? {
        target.active_tcoords = target.push(desc);
    }
    Ok(())
}

/// Append the normals of `source` and make them active.
pub fn dump_normals(writer: &mut ArrayWriter<'_>, source: &DataSetAttributes, target: &mut AttributeSet) -> Result<()> {
    if let Some(desc) = writer.dump_optional(source.normals())? {
        target.active_normals = target.push(desc);
    }
    Ok(())
}

fn dump_group(writer: &mut ArrayWriter<'_>, source: &DataSetAttributes, target: &mut AttributeSet) -> Result<()> {
    for array in source.arrays() {
        let desc = writer.dump(array)?;
        target.push(desc);
    }
    if !target.is_empty() {
        target.active_scalars = 0;
    }
    Ok(())
}

/// Containers holding every point array, then every cell array. The first
/// array of each group becomes its active scalars. Texture coordinates and
/// normals are appended to the point data afterwards.
pub fn dump_all_arrays(
    writer: &mut ArrayWriter<'_>,
    point_data: &DataSetAttributes,
    cell_data: &DataSetAttributes,
) -> Result<DatasetAttributes> {
    let mut out = DatasetAttributes::default();
    dump_group(writer, point_data, &mut out.point_data)?;
    dump_group(writer, cell_data, &mut out.cell_data)?;
    dump_tcoords(writer, point_data, &mut out.point_data)?;
    dump_normals(writer, point_data, &mut out.point_data)?;
    Ok(out)
}
