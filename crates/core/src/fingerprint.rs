//! Job identity derivation.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::manager::DownloadOptions;

/// Deterministic identity for one (video, format, range) request.
///
/// Rendered as lowercase hex of a SHA-256 digest. Two requests with
/// identical fields always map to the same fingerprint; the table key is
/// never reversed back to its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobFingerprint(String);

impl JobFingerprint {
    /// Wraps an already-computed hex digest, e.g. one received from a caller
    /// polling for status.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the fingerprint for a request.
///
/// The video id is length-prefixed and the numeric fields are hashed in
/// fixed-width big-endian form, so distinct tuples cannot collapse into the
/// same digest input the way naive string concatenation lets them.
pub fn fingerprint(video_id: &str, options: &DownloadOptions) -> JobFingerprint {
    let mut hasher = Sha256::new();
    hasher.update((video_id.len() as u64).to_be_bytes());
    hasher.update(video_id.as_bytes());
    hasher.update(options.format.to_be_bytes());
    hasher.update(options.start_ms.to_be_bytes());
    hasher.update(options.end_ms.to_be_bytes());
    JobFingerprint(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(format: u32, start_ms: u64, end_ms: u64) -> DownloadOptions {
        DownloadOptions {
            format,
            start_ms,
            end_ms,
        }
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = fingerprint("dQw4w9WgXcQ", &options(18, 0, 5000));
        let b = fingerprint("dQw4w9WgXcQ", &options(18, 0, 5000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_distinguishes_each_field() {
        let base = fingerprint("abc", &options(18, 1000, 5000));
        assert_ne!(base, fingerprint("abd", &options(18, 1000, 5000)));
        assert_ne!(base, fingerprint("abc", &options(22, 1000, 5000)));
        assert_ne!(base, fingerprint("abc", &options(18, 2000, 5000)));
        assert_ne!(base, fingerprint("abc", &options(18, 1000, 6000)));
    }

    #[test]
    fn test_fingerprint_resists_concatenation_ambiguity() {
        // Under naive concatenation both of these flatten to "a1234".
        let a = fingerprint("a", &options(12, 3, 4));
        let b = fingerprint("a1", &options(2, 3, 4));
        assert_ne!(a, b);

        // Digits sliding between adjacent numeric fields.
        let c = fingerprint("v", &options(1, 23, 4));
        let d = fingerprint("v", &options(12, 3, 4));
        assert_ne!(c, d);
    }

    #[test]
    fn test_fingerprint_is_hex() {
        let fp = fingerprint("abc", &options(18, 0, 5000));
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_serde_transparent() {
        let fp = fingerprint("abc", &options(18, 0, 5000));
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{}\"", fp.as_str()));
        let parsed: JobFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fp);
    }
}
