//! # Utility Functions Module
//!
//! Helpers for building the argument vectors handed to external tools.
//! Arguments stay `OsString` so file names that are not valid UTF-8 reach
//! the tool byte for byte.

use std::ffi::{OsStr, OsString};

/// Converts one argument (literal, `String`, `Path`, `OsStr`) to an owned `OsString`.
///
/// # Example
/// ```rust
/// use std::path::Path;
/// use video_compressor::utils::os_arg;
///
/// assert_eq!(os_arg("-y"), "-y");
/// assert_eq!(os_arg(Path::new("in.mp4")), "in.mp4");
/// ```
pub fn os_arg<S>(item: &S) -> OsString
where
    S: AsRef<OsStr> + ?Sized,
{
    item.as_ref().to_os_string()
}

/// Builds a `Vec<OsString>` of command arguments from heterogeneous items.
///
/// Each item is converted on its own, so string literals, `String`s and
/// paths can be mixed freely.
///
/// # Example
/// ```rust
/// use std::path::Path;
/// use video_compressor::args;
///
/// let crf = 28.to_string();
/// let args = args!["-crf", crf, "-i", Path::new("in.mp4")];
/// assert_eq!(args, vec!["-crf", "28", "-i", "in.mp4"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$($crate::utils::os_arg(&$item)),*]
    };
}
