//! # Duration Probe
//!
//! Reads a container's duration through `ffprobe`. Every failure (missing
//! executable, non-zero exit, unparseable output) collapses to `None`; the
//! cause is only logged.

use crate::args;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, warn};

/// Arguments asking ffprobe for the bare `format.duration` value of `input_path`
pub fn probe_args(input_path: &Path) -> Vec<OsString> {
    args![
        "-v",
        "error",
        "-show_entries",
        "format=duration",
        "-of",
        "default=noprint_wrappers=1:nokey=1",
        input_path
    ]
}

/// Parse ffprobe's stdout as a duration in seconds.
///
/// Negative or non-finite values are rejected.
pub fn parse_duration(stdout: &str) -> Option<f64> {
    stdout
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Get the duration of `input_path` in seconds
pub async fn probe_duration(ffprobe: &str, input_path: &Path) -> Option<f64> {
    let output = match Command::new(ffprobe)
        .args(probe_args(input_path))
        .output()
        .await
    {
        Ok(output) => output,
        Err(e) => {
            warn!("Failed to execute {}: {}", ffprobe, e);
            return None;
        }
    };

    if !output.status.success() {
        warn!(
            "{} exited with {} for {}: {}",
            ffprobe,
            output.status,
            input_path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let duration = parse_duration(&stdout);
    match duration {
        Some(secs) => debug!("Duration of {}: {:.2}s", input_path.display(), secs),
        None => warn!("Unparseable duration from {}: {:?}", ffprobe, stdout.trim()),
    }
    duration
}
