//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file del compressore.
//!
//! ## Responsabilità:
//! - Derivazione del path di output a partire dal path di input
//! - Verifica delle estensioni video accettate in input
//! - Lettura delle dimensioni dei file
//!
//! ## Formati accettati:
//! - **Video**: MP4, AVI, MOV, MKV
//!
//! ## Naming dell'output:
//! `{input senza estensione}_compressed{estensione originale}`, nella stessa
//! directory dell'input. Due richieste concorrenti sullo stesso input
//! scrivono sullo stesso file di output.
//!
//! ## Esempio:
//! ```rust
//! use std::path::Path;
//! use video_compressor::file_manager::FileManager;
//!
//! let output = FileManager::compressed_output_path(Path::new("clips/holiday.mp4"));
//! assert_eq!(output, Path::new("clips/holiday_compressed.mp4"));
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Extensions accepted as compression input (lowercase, without dot)
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

/// Suffix inserted before the extension of the output file
pub const OUTPUT_SUFFIX: &str = "_compressed";

/// Manages file naming and size lookups
pub struct FileManager;

impl FileManager {
    /// Derive the output path by inserting `_compressed` before the extension
    pub fn compressed_output_path(input_path: &Path) -> PathBuf {
        let mut file_name: OsString = input_path
            .file_stem()
            .map(|stem| stem.to_os_string())
            .unwrap_or_default();
        file_name.push(OUTPUT_SUFFIX);
        if let Some(ext) = input_path.extension() {
            file_name.push(".");
            file_name.push(ext);
        }
        input_path.with_file_name(file_name)
    }

    /// Check if a file has one of the accepted video extensions
    pub fn is_supported_video(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                SUPPORTED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Size of a file in bytes
    pub async fn file_size(path: &Path) -> std::io::Result<u64> {
        Ok(fs::metadata(path).await?.len())
    }

    /// Format a byte count as a human-readable string
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_keeps_extension() {
        assert_eq!(
            FileManager::compressed_output_path(Path::new("/tmp/in/video.mkv")),
            PathBuf::from("/tmp/in/video_compressed.mkv")
        );
        assert_eq!(
            FileManager::compressed_output_path(Path::new("movie.final.MOV")),
            PathBuf::from("movie.final_compressed.MOV")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        assert_eq!(
            FileManager::compressed_output_path(Path::new("/data/raw")),
            PathBuf::from("/data/raw_compressed")
        );
    }

    #[test]
    fn test_output_path_differs_from_input() {
        let input = Path::new("a/b/c.mp4");
        assert_ne!(FileManager::compressed_output_path(input), input);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(FileManager::is_supported_video(Path::new("a.mp4")));
        assert!(FileManager::is_supported_video(Path::new("a.AVI")));
        assert!(FileManager::is_supported_video(Path::new("dir/a.Mov")));
        assert!(FileManager::is_supported_video(Path::new("a.mkv")));
        assert!(!FileManager::is_supported_video(Path::new("a.webm")));
        assert!(!FileManager::is_supported_video(Path::new("a.jpg")));
        assert!(!FileManager::is_supported_video(Path::new("mp4")));
    }

    #[tokio::test]
    async fn test_file_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, vec![0u8; 2048]).await.unwrap();

        assert_eq!(FileManager::file_size(&path).await.unwrap(), 2048);
        assert!(FileManager::file_size(&dir.path().join("missing.mp4")).await.is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(FileManager::format_size(512), "512 B");
        assert_eq!(FileManager::format_size(1536), "1.50 KB");
        assert_eq!(FileManager::format_size(10 * 1024 * 1024), "10.00 MB");
    }
}
