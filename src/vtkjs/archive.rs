//! Archive packer: zips the entries of an export and base64-encodes the
//! result.

use std::io::{Cursor, Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::schema::{to_json_pretty, SceneDescription};
use crate::core::{ArchiveEntries, ArchiveEntry};
use crate::util::{Error, Result};

/// Path of the top-level scene description.
pub const SCENE_INDEX: &str = "index.json";

/// Indent of the top-level `index.json`.
const SCENE_INDENT: &[u8] = b"    ";

/// Zip `entries` in order, deflating each file.
pub fn write_zip<'a>(entries: impl IntoIterator<Item = &'a ArchiveEntry>) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for entry in entries {
        zip.start_file(entry.path.as_str(), options)?;
        zip.write_all(&entry.content)?;
    }
    Ok(zip.finish()?.into_inner())
}

/// Append the scene description as `index.json`, zip everything and
/// return the archive as standard base64.
pub fn pack(mut entries: ArchiveEntries, scene: &SceneDescription) -> Result<String> {
    entries.push_file(SCENE_INDEX, to_json_pretty(scene, SCENE_INDENT)?);
    let bytes = write_zip(entries.iter())?;
    tracing::debug!("packed {} entries into {} bytes", entries.len(), bytes.len());
    Ok(STANDARD.encode(bytes))
}

/// Decode a packed archive back into its entries, in archive order.
pub fn unpack(encoded: &str) -> Result<Vec<ArchiveEntry>> {
    let bytes = STANDARD.decode(encoded.trim())?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut out = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let path = file.name().to_string();
        let mut content = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut content)?;
        out.push(ArchiveEntry { path, content });
    }
    Ok(out)
}

/// Parse the scene description out of unpacked entries.
pub fn read_scene(entries: &[ArchiveEntry]) -> Result<SceneDescription> {
    let index = entries
        .iter()
        .find(|e| e.path == SCENE_INDEX)
        .ok_or_else(|| Error::invalid("archive has no top-level index.json"))?;
    Ok(serde_json::from_slice(&index.content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtkjs::schema::CameraState;
    use glam::{DVec2, DVec3};

    fn empty_scene() -> SceneDescription {
        SceneDescription {
            fetch_gzip: false,
            background: DVec3::new(0.1, 0.2, 0.3),
            camera: CameraState {
                focal_point: DVec3::ZERO,
                position: DVec3::Z,
                view_up: DVec3::Y,
                clipping_range: DVec2::new(0.01, 1000.01),
            },
            center_of_rotation: DVec3::ZERO,
            scene: Vec::new(),
        }
    }

    #[test]
    fn test_pack_unpack() {
        let mut entries = ArchiveEntries::new();
        entries.push_blob("1/data/abc", &[1, 2, 3]);
        entries.push_file("1/index.json", "{}");

        let encoded = pack(entries, &empty_scene()).unwrap();
        let back = unpack(&encoded).unwrap();
        let paths: Vec<&str> = back.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["1/data/abc", "1/index.json", "index.json"]);
        assert_eq!(back[0].content, vec![1, 2, 3]);
        assert_eq!(read_scene(&back).unwrap(), empty_scene());

        let text = std::str::from_utf8(&back[2].content).unwrap();
        assert!(text.starts_with("{\n    \"fetchGzip\": false"));
    }

    #[test]
    fn test_duplicate_path_is_an_error() {
        let entry = ArchiveEntry {
            path: "a".into(),
            content: vec![],
        };
        let result = write_zip([&entry, &entry]);
        assert!(matches!(result, Err(Error::Zip(_))));
    }

    #[test]
    fn test_bad_payload() {
        assert!(matches!(unpack("not base64!"), Err(Error::Base64(_))));
        let not_zip = STANDARD.encode(b"plain text");
        assert!(matches!(unpack(&not_zip), Err(Error::Zip(_))));
    }

    #[test]
    fn test_missing_index() {
        assert!(matches!(read_scene(&[]), Err(Error::InvalidStructure(_))));
    }
}
