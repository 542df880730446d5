//! # Command Builder
//!
//! Builds the ffmpeg invocation for one compression: overwrite the output,
//! re-encode video with libx265 at a given CRF and audio with AAC.

use crate::args;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;

/// Video codec passed to `-c:v`
pub const VIDEO_CODEC: &str = "libx265";
/// Audio codec passed to `-c:a`
pub const AUDIO_CODEC: &str = "aac";

/// Render a quality value the way ffmpeg receives it (truncated to an integer).
///
/// Large values are written out in full rather than saturating.
pub fn crf_arg(crf: f64) -> String {
    // `+ 0.0` turns a truncated `-0.0` into `0`
    format!("{:.0}", crf.trunc() + 0.0)
}

/// Build the encoder arguments. No range check is applied to `crf`.
pub fn build_encode_args(input_path: &Path, output_path: &Path, crf: f64) -> Vec<OsString> {
    let crf = crf_arg(crf);
    args![
        "-y", "-i", input_path, "-c:v", VIDEO_CODEC, "-crf", crf, "-c:a", AUDIO_CODEC, output_path,
    ]
}

/// An encoder program together with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl EncodeCommand {
    pub fn new(program: &str, input_path: &Path, output_path: &Path, crf: f64) -> Self {
        Self {
            program: program.to_string(),
            args: build_encode_args(input_path, output_path, crf),
        }
    }

    /// A `tokio` command ready to spawn
    pub fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for EncodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", Path::new(arg).display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_encode_args() {
        let args = build_encode_args(Path::new("in.mp4"), Path::new("in_compressed.mp4"), 28.0);
        assert_eq!(
            args,
            vec![
                "-y",
                "-i",
                "in.mp4",
                "-c:v",
                "libx265",
                "-crf",
                "28",
                "-c:a",
                "aac",
                "in_compressed.mp4",
            ]
        );
    }

    #[test]
    fn test_crf_is_truncated_to_integer() {
        assert_eq!(crf_arg(28.7), "28");
        assert_eq!(crf_arg(23.0), "23");
        assert_eq!(crf_arg(31.999), "31");
        assert_eq!(crf_arg(-0.5), "0");
    }

    #[test]
    fn test_huge_crf_is_not_saturated() {
        assert_eq!(crf_arg(1e20), "100000000000000000000");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_paths_pass_through() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"clip\xff.mp4"));
        let output = Path::new(OsStr::from_bytes(b"clip\xff_compressed.mp4"));
        let args = build_encode_args(input, output, 28.0);

        assert_eq!(args[2].as_bytes(), b"clip\xff.mp4");
        assert_eq!(args[9].as_bytes(), b"clip\xff_compressed.mp4");
    }

    #[test]
    fn test_out_of_range_crf_passes_through() {
        let args = build_encode_args(Path::new("a.mkv"), Path::new("b.mkv"), 51.0);
        assert!(args.windows(2).any(|w| w[0] == "-crf" && w[1] == "51"));
        let args = build_encode_args(Path::new("a.mkv"), Path::new("b.mkv"), 5.0);
        assert!(args.windows(2).any(|w| w[0] == "-crf" && w[1] == "5"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let first = EncodeCommand::new("ffmpeg", Path::new("x.mov"), Path::new("y.mov"), 30.0);
        let second = EncodeCommand::new("ffmpeg", Path::new("x.mov"), Path::new("y.mov"), 30.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_renders_command_line() {
        let cmd = EncodeCommand::new("ffmpeg", Path::new("x.mov"), Path::new("y.mov"), 30.0);
        assert_eq!(
            cmd.to_string(),
            "ffmpeg -y -i x.mov -c:v libx265 -crf 30 -c:a aac y.mov"
        );
    }
}
