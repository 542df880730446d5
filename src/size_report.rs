//! # Size Reporter
//!
//! Compares the original and compressed file sizes and renders the summary
//! shown to the user once an encode succeeds.

use crate::file_manager::FileManager;
use std::fmt;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Sizes of an input and its compressed output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl SizeReport {
    pub fn new(original_bytes: u64, compressed_bytes: u64) -> Self {
        Self {
            original_bytes,
            compressed_bytes,
        }
    }

    /// Stat both files. Fails if either cannot be read.
    pub async fn from_paths(original: &Path, compressed: &Path) -> std::io::Result<Self> {
        let original_bytes = FileManager::file_size(original).await?;
        let compressed_bytes = FileManager::file_size(compressed).await?;
        Ok(Self::new(original_bytes, compressed_bytes))
    }

    pub fn original_mb(&self) -> f64 {
        self.original_bytes as f64 / BYTES_PER_MB
    }

    pub fn compressed_mb(&self) -> f64 {
        self.compressed_bytes as f64 / BYTES_PER_MB
    }

    /// `(1 - new/original) * 100`, or 0 for an empty original
    pub fn reduction_percent(&self) -> f64 {
        if self.original_bytes > 0 {
            (1.0 - self.compressed_bytes as f64 / self.original_bytes as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compression complete!\nOriginal: {:.1} MB\nNew: {:.1} MB\nReduced by: {:.1}%",
            self.original_mb(),
            self.compressed_mb(),
            self.reduction_percent()
        )
    }
}

/// Summary message for a finished compression of `original` into `compressed`
pub async fn summarize_compression(original: &Path, compressed: &Path) -> std::io::Result<String> {
    Ok(SizeReport::from_paths(original, compressed).await?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn sized_file(dir: &TempDir, name: &str, len: u64) -> std::path::PathBuf {
        let path = dir.path().join(name);
        File::create(&path).unwrap().set_len(len).unwrap();
        path
    }

    #[test]
    fn test_reduction_percent() {
        let report = SizeReport::new(10 * 1024 * 1024, 4 * 1024 * 1024);
        assert!((report.reduction_percent() - 60.0).abs() < 1e-9);
        assert_eq!(report.original_mb(), 10.0);
        assert_eq!(report.compressed_mb(), 4.0);
    }

    #[test]
    fn test_empty_original_reports_zero() {
        let report = SizeReport::new(0, 1024);
        assert_eq!(report.reduction_percent(), 0.0);
        assert!(report.to_string().ends_with("Reduced by: 0.0%"));
    }

    #[test]
    fn test_larger_output_is_negative_reduction() {
        let report = SizeReport::new(1000, 1500);
        assert!((report.reduction_percent() + 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_format() {
        let report = SizeReport::new(10 * 1024 * 1024, 4 * 1024 * 1024);
        assert_eq!(
            report.to_string(),
            "Compression complete!\nOriginal: 10.0 MB\nNew: 4.0 MB\nReduced by: 60.0%"
        );
    }

    #[tokio::test]
    async fn test_summarize_from_files() {
        let dir = TempDir::new().unwrap();
        let original = sized_file(&dir, "in.mp4", 10 * 1024 * 1024);
        let compressed = sized_file(&dir, "in_compressed.mp4", 4 * 1024 * 1024);

        let msg = summarize_compression(&original, &compressed).await.unwrap();
        assert!(msg.contains("Original: 10.0 MB"));
        assert!(msg.contains("New: 4.0 MB"));
        assert!(msg.contains("Reduced by: 60.0%"));
    }

    #[tokio::test]
    async fn test_summarize_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let original = sized_file(&dir, "in.mp4", 1024);
        let missing = dir.path().join("in_compressed.mp4");

        assert!(summarize_compression(&original, &missing).await.is_err());
    }
}
