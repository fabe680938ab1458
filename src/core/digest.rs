//! Content digests for blob deduplication.

use md5::{Digest, Md5};

/// 128-bit digest of a blob.
pub type BlobDigest = [u8; 16];

/// Compute the MD5 digest of `data`.
#[inline]
pub fn compute_digest(data: &[u8]) -> BlobDigest {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Lowercase hex form of the MD5 digest of `data`, used as the blob name.
pub fn hex_digest(data: &[u8]) -> String {
    compute_digest(data).iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(hex_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(hex_digest(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_hex_matches_raw() {
        let raw = compute_digest(b"points");
        let hex: String = raw.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(hex, hex_digest(b"points"));
    }
}
