//! Export configuration.

use serde::{Deserialize, Serialize};

use crate::util::Result;

/// Settings for one export.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    /// Ask for gzip-compressed array blobs. Not supported yet: exporting any
    /// array with this set fails with [`Error::Unsupported`](crate::Error::Unsupported).
    /// The flag is still echoed as `fetchGzip` in the scene description.
    pub compress_arrays: bool,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compress_arrays(mut self, compress: bool) -> Self {
        self.compress_arrays = compress;
        self
    }

    /// Parse options from JSON. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
