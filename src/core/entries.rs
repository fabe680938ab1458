//! Accumulator for the files that make up one export.

use std::collections::HashSet;

/// One file of the archive: a path relative to the archive root and its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub content: Vec<u8>,
}

/// Ordered list of archive entries built during a single export.
///
/// Blobs are content addressed, so registering a blob path twice keeps the
/// first entry only. Other files are appended as given.
#[derive(Debug, Default)]
pub struct ArchiveEntries {
    entries: Vec<ArchiveEntry>,
    blob_paths: HashSet<String>,
}

impl ArchiveEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content-addressed blob. Returns false if the path was
    /// already present.
    pub fn push_blob(&mut self, path: impl Into<String>, content: &[u8]) -> bool {
        let path = path.into();
        if !self.blob_paths.insert(path.clone()) {
            tracing::trace!("blob {} already registered", path);
            return false;
        }
        tracing::trace!("blob {} ({} bytes)", path, content.len());
        self.entries.push(ArchiveEntry {
            path,
            content: content.to_vec(),
        });
        true
    }

    /// Append a file unconditionally.
    pub fn push_file(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.entries.push(ArchiveEntry {
            path: path.into(),
            content: content.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct blobs registered.
    pub fn blob_count(&self) -> usize {
        self.blob_paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    pub fn get(&self, path: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn into_vec(self) -> Vec<ArchiveEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_dedup() {
        let mut entries = ArchiveEntries::new();
        assert!(entries.push_blob("a/data/x", b"123"));
        assert!(!entries.push_blob("a/data/x", b"123"));
        assert!(entries.push_blob("b/data/x", b"123"));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.blob_count(), 2);
    }

    #[test]
    fn test_files_keep_order() {
        let mut entries = ArchiveEntries::new();
        entries.push_file("a/index.json", "{}");
        entries.push_blob("a/data/x", b"1");
        entries.push_file("index.json", "{}");
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["a/index.json", "a/data/x", "index.json"]);
    }
}
