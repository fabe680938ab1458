//! JSON documents of a vtk.js scene archive.
//!
//! Field names and nesting follow what the web-side scene importer reads;
//! renaming anything here breaks interop.

use glam::{DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::util::Result;

pub const VTK_DATA_ARRAY: &str = "vtkDataArray";
pub const VTK_POINTS: &str = "vtkPoints";
pub const VTK_CELL_ARRAY: &str = "vtkCellArray";
pub const VTK_DATA_SET_ATTRIBUTES: &str = "vtkDataSetAttributes";
pub const HTTP_DATA_SET_READER: &str = "httpDataSetReader";

/// Location of a blob relative to its dataset directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Hex content digest, also the blob's file name.
    pub id: String,
    /// `"LittleEndian"` or `"BigEndian"`.
    pub encode: String,
    pub basepath: String,
}

/// Value range of one component (or of the magnitude when `component` is
/// absent on a vector array).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeInfo {
    pub min: f64,
    pub max: f64,
    pub component: Option<String>,
}

/// Metadata record of one stored array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDescriptor {
    #[serde(rename = "ref")]
    pub blob: BlobRef,
    pub vtk_class: String,
    pub name: Option<String>,
    pub data_type: String,
    pub number_of_components: usize,
    pub size: usize,
    pub ranges: SmallVec<[RangeInfo; 4]>,
}

/// Wrapper the consumer expects around each attribute array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrayEntry {
    pub data: ArrayDescriptor,
}

/// Attribute container (point, cell or field data) of a dataset.
///
/// Active indices are -1 until the matching array is appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeSet {
    #[serde(rename = "vtkClass")]
    pub vtk_class: String,
    #[serde(rename = "activeGlobalIds")]
    pub active_global_ids: i32,
    #[serde(rename = "activeNormals")]
    pub active_normals: i32,
    #[serde(rename = "activePedigreeIds")]
    pub active_pedigree_ids: i32,
    #[serde(rename = "activeScalars")]
    pub active_scalars: i32,
    #[serde(rename = "activeTCoords")]
    pub active_tcoords: i32,
    #[serde(rename = "activeTensors")]
    pub active_tensors: i32,
    #[serde(rename = "activeVectors")]
    pub active_vectors: i32,
    pub arrays: Vec<ArrayEntry>,
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self {
            vtk_class: VTK_DATA_SET_ATTRIBUTES.to_string(),
            active_global_ids: -1,
            active_normals: -1,
            active_pedigree_ids: -1,
            active_scalars: -1,
            active_tcoords: -1,
            active_tensors: -1,
            active_vectors: -1,
            arrays: Vec::new(),
        }
    }
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an array and return its index.
    pub fn push(&mut self, data: ArrayDescriptor) -> i32 {
        self.arrays.push(ArrayEntry { data });
        self.arrays.len() as i32 - 1
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

/// The three attribute containers every dataset carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetAttributes {
    pub point_data: AttributeSet,
    pub cell_data: AttributeSet,
    pub field_data: AttributeSet,
}

/// `index.json` of one dataset directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetIndex {
    pub metadata: DatasetMetadata,
    #[serde(flatten)]
    pub body: DatasetBody,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub name: String,
}

/// Dataset payload, tagged by its `vtkClass`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "vtkClass")]
pub enum DatasetBody {
    #[serde(rename = "vtkPolyData")]
    PolyData(PolyDataBody),
    #[serde(rename = "vtkImageData")]
    ImageData(ImageDataBody),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyDataBody {
    pub points: ArrayDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verts: Option<ArrayDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<ArrayDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polys: Option<ArrayDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strips: Option<ArrayDescriptor>,
    #[serde(flatten)]
    pub attributes: DatasetAttributes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageDataBody {
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub extent: [i32; 6],
    #[serde(flatten)]
    pub attributes: DatasetAttributes,
}

/// Top-level `index.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub fetch_gzip: bool,
    pub background: DVec3,
    pub camera: CameraState,
    pub center_of_rotation: DVec3,
    pub scene: Vec<SceneComponent>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraState {
    pub focal_point: DVec3,
    pub position: DVec3,
    pub view_up: DVec3,
    pub clipping_range: DVec2,
}

/// One exported prop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneComponent {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub http_data_set_reader: DataSetReader,
    pub actor: ActorState,
    pub actor_rotation: DVec4,
    pub mapper: MapperState,
    pub property: PropertyState,
    pub lookup_table: LookupTableState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataSetReader {
    /// Dataset directory inside the archive.
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    pub origin: DVec3,
    pub scale: DVec3,
    pub position: DVec3,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapperState {
    pub color_by_array_name: String,
    pub color_mode: i32,
    pub scalar_mode: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyState {
    pub representation: i32,
    pub edge_visibility: bool,
    pub diffuse_color: DVec3,
    pub point_size: f64,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupTableState {
    pub table_range: [f64; 2],
    pub hue_range: [f64; 2],
}

/// Pretty-print `value` as JSON with the given indent string.
pub(crate) fn to_json_pretty<T: Serialize>(value: &T, indent: &[u8]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_set_keys() {
        let value = serde_json::to_value(AttributeSet::new()).unwrap();
        assert_eq!(
            value,
            json!({
                "vtkClass": "vtkDataSetAttributes",
                "activeGlobalIds": -1,
                "activeNormals": -1,
                "activePedigreeIds": -1,
                "activeScalars": -1,
                "activeTCoords": -1,
                "activeTensors": -1,
                "activeVectors": -1,
                "arrays": []
            })
        );
    }

    #[test]
    fn test_dataset_index_is_tagged() {
        let index = DatasetIndex {
            metadata: DatasetMetadata { name: "img".into() },
            body: DatasetBody::ImageData(ImageDataBody {
                spacing: [1.0; 3],
                origin: [0.0; 3],
                extent: [0, 1, 0, 1, 0, 0],
                attributes: DatasetAttributes::default(),
            }),
        };
        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value["vtkClass"], "vtkImageData");
        assert_eq!(value["metadata"]["name"], "img");
        assert_eq!(value["extent"], json!([0, 1, 0, 1, 0, 0]));
        assert!(value["pointData"].is_object());
        assert!(value.get("points").is_none());
    }

    #[test]
    fn test_indent() {
        let text = to_json_pretty(&json!({"a": 1}), b"    ").unwrap();
        assert_eq!(String::from_utf8(text).unwrap(), "{\n    \"a\": 1\n}");
    }
}
