//! Array codec: stores one array as a content-addressed blob and describes
//! it for the dataset's `index.json`.
//!
//! Blobs hold raw host-order values. The blob name is the MD5 hex digest of
//! those bytes, so identical arrays within a dataset share one blob.
//! 64-bit index arrays are narrowed to `Uint32` before hashing because the
//! consumer has no 64-bit integer view.

use std::borrow::Cow;

use byteorder::{ByteOrder, NativeEndian};
use smallvec::SmallVec;

use super::schema::{ArrayDescriptor, BlobRef, RangeInfo, VTK_DATA_ARRAY};
use super::ExportOptions;
use crate::core::{hex_digest, ArchiveEntries, ArrayValues, DataArray};
use crate::util::{Error, Result};

/// Directory under each dataset that holds its blobs.
pub const DATA_DIR: &str = "data";

/// Byte order tag of this host, as recorded in every blob reference.
pub fn byte_order_tag() -> &'static str {
    if cfg!(target_endian = "big") {
        "BigEndian"
    } else {
        "LittleEndian"
    }
}

/// Narrow 64-bit ids to `u32`. Negative ids (and ids that do not fit)
/// become `u32::MAX`.
pub fn narrow_ids(ids: &[i64]) -> Vec<u32> {
    ids.iter()
        .map(|&id| u32::try_from(id).unwrap_or(u32::MAX))
        .collect()
}

/// Bytes stored for `array`, after narrowing.
pub fn stored_bytes(array: &DataArray) -> Cow<'_, [u8]> {
    match array.values() {
        ArrayValues::IdType(ids) => {
            let narrowed = narrow_ids(ids);
            let mut buf = vec![0u8; narrowed.len() * 4];
            NativeEndian::write_u32_into(&narrowed, &mut buf);
            Cow::Owned(buf)
        }
        _ => Cow::Borrowed(array.as_bytes()),
    }
}

/// Per-component ranges, plus a magnitude entry for vector arrays.
///
/// Computed on the source values, before any narrowing. Empty or all-NaN
/// components report `[0, 0]`.
pub fn array_ranges(array: &DataArray) -> SmallVec<[RangeInfo; 4]> {
    let info = |range: Option<(f64, f64)>, component: Option<&str>| {
        let (min, max) = range.unwrap_or((0.0, 0.0));
        RangeInfo {
            min,
            max,
            component: component.map(str::to_string),
        }
    };

    let n = array.number_of_components();
    let mut out: SmallVec<[RangeInfo; 4]> = (0..n)
        .map(|c| info(array.range(Some(c)), array.component_name(c)))
        .collect();
    if n > 1 {
        out.push(info(array.range(None), None));
    }
    out
}

/// Writes array blobs of one dataset into the entry list.
///
/// Handed to each dumper so that every blob of the dataset lands under the
/// same directory with the same options.
pub struct ArrayWriter<'a> {
    entries: &'a mut ArchiveEntries,
    dataset_dir: &'a str,
    options: &'a ExportOptions,
}

impl<'a> ArrayWriter<'a> {
    pub fn new(entries: &'a mut ArchiveEntries, dataset_dir: &'a str, options: &'a ExportOptions) -> Self {
        Self {
            entries,
            dataset_dir,
            options,
        }
    }

    pub fn dataset_dir(&self) -> &str {
        self.dataset_dir
    }

    /// Archive path of the blob with hex digest `id`.
    pub fn blob_path(&self, id: &str) -> String {
        format!("{}/{}/{}", self.dataset_dir, DATA_DIR, id)
    }

    /// Store `array` and return its descriptor.
    ///
    /// Fails with [`Error::Unsupported`] when blob compression is requested;
    /// nothing is registered in that case.
    pub fn dump(&mut self, array: &DataArray) -> Result<ArrayDescriptor> {
        if self.options.compress_arrays {
            return Err(Error::unsupported("compressed array blobs"));
        }

        let bytes = stored_bytes(array);
        let id = hex_digest(&bytes);
        let path = self.blob_path(&id);
        self.entries.push_blob(path, &bytes);

        Ok(ArrayDescriptor {
            blob: BlobRef {
                id,
                encode: byte_order_tag().to_string(),
                basepath: DATA_DIR.to_string(),
            },
            vtk_class: VTK_DATA_ARRAY.to_string(),
            name: array.name().map(str::to_string),
            data_type: array.data_type().stored().js_name().to_string(),
            number_of_components: array.number_of_components(),
            size: array.size(),
            ranges: array_ranges(array),
        })
    }

    /// [`dump`](Self::dump) for an optional array; absent gives `None`.
    pub fn dump_optional(&mut self, array: Option<&DataArray>) -> Result<Option<ArrayDescriptor>> {
        array.map(|a| self.dump(a)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_one(array: &DataArray) -> (ArrayDescriptor, ArchiveEntries) {
        let mut entries = ArchiveEntries::new();
        let options = ExportOptions::default();
        let desc = ArrayWriter::new(&mut entries, "7", &options).dump(array).unwrap();
        (desc, entries)
    }

    #[test]
    fn test_scalar_descriptor() {
        let array = DataArray::scalars("temp", vec![1.0f32, 5.0, 3.0]);
        let (desc, entries) = dump_one(&array);

        assert_eq!(desc.data_type, "Float32Array");
        assert_eq!(desc.name.as_deref(), Some("temp"));
        assert_eq!(desc.number_of_components, 1);
        assert_eq!(desc.size, 3);
        assert_eq!(desc.vtk_class, "vtkDataArray");
        assert_eq!(desc.blob.basepath, "data");
        assert_eq!(desc.blob.encode, byte_order_tag());
        assert_eq!(desc.ranges.len(), 1);
        assert_eq!((desc.ranges[0].min, desc.ranges[0].max), (1.0, 5.0));
        assert_eq!(desc.ranges[0].component, None);

        let path = format!("7/data/{}", desc.blob.id);
        let blob = entries.get(&path).unwrap();
        assert_eq!(blob.content.len(), 12);
        assert_eq!(desc.blob.id, hex_digest(&blob.content));
    }

    #[test]
    fn test_vector_ranges() {
        let mut array = DataArray::new("v", 3, vec![3.0f64, 0.0, -4.0, 0.0, 1.0, 0.0]).unwrap();
        array.set_component_name(0, "X");
        let ranges = array_ranges(&array);
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0].component.as_deref(), Some("X"));
        assert_eq!(ranges[1].component, None);
        assert_eq!((ranges[2].min, ranges[2].max), (-4.0, 0.0));
        assert_eq!((ranges[3].min, ranges[3].max), (1.0, 5.0));
    }

    #[test]
    fn test_ids_are_narrowed() {
        let array = DataArray::ids(vec![3, 0, 1, -1]);
        let (desc, entries) = dump_one(&array);
        assert_eq!(desc.data_type, "Uint32Array");
        assert_eq!(desc.size, 4);
        assert_eq!((desc.ranges[0].min, desc.ranges[0].max), (-1.0, 3.0));

        let blob = &entries.iter().next().unwrap().content;
        assert_eq!(blob.len(), 16);
        let mut back = [0u32; 4];
        NativeEndian::read_u32_into(blob, &mut back);
        assert_eq!(back, [3, 0, 1, u32::MAX]);
    }

    #[test]
    fn test_identical_arrays_share_a_blob() {
        let mut entries = ArchiveEntries::new();
        let options = ExportOptions::default();
        let mut writer = ArrayWriter::new(&mut entries, "1", &options);
        let a = writer.dump(&DataArray::scalars("a", vec![1u8, 2, 3])).unwrap();
        let b = writer.dump(&DataArray::scalars("b", vec![1u8, 2, 3])).unwrap();
        assert_eq!(a.blob.id, b.blob.id);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_compression_is_rejected() {
        let mut entries = ArchiveEntries::new();
        let options = ExportOptions::new().with_compress_arrays(true);
        let result = ArrayWriter::new(&mut entries, "1", &options).dump(&DataArray::scalars("a", vec![1.0f32]));
        assert!(matches!(result, Err(Error::Unsupported(_))));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_array() {
        let (desc, _) = dump_one(&DataArray::scalars("e", Vec::<f32>::new()));
        assert_eq!(desc.size, 0);
        assert_eq!(desc.blob.id, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!((desc.ranges[0].min, desc.ranges[0].max), (0.0, 0.0));
    }
}
