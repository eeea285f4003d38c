//! Convenience functions taking encoding names instead of [`Charset`] values.
//!
//! Each function looks the encoding names up first, so an unknown name fails
//! with [`crate::FencError::UnsupportedEncoding`] before any file is touched. Files
//! are resolved with the built-in configuration (resource names are searched
//! for under `./resources`).

use crate::{Charset, Detection, FileAccess, Result};
use std::path::Path;

/// Reads `path` as text under the encoding named `encoding`.
///
/// # Example
/// ```no_run
/// use fenc::convenience::read_text;
///
/// let text = read_text("/etc/hostname", "UTF-8").unwrap();
/// println!("{}", text.trim());
/// ```
pub fn read_text(path: &str, encoding: &str) -> Result<String> {
    let charset = Charset::for_label(encoding)?;
    FileAccess::default().read_text(path, charset)
}

/// Reads `path` verbatim.
pub fn read_bytes(path: &str) -> Result<Vec<u8>> {
    FileAccess::default().read_bytes(path)
}

/// Detects the encoding of `path`. Input without any non-ASCII evidence
/// reports [`crate::Confidence::Fallback`] and UTF-8.
pub fn detect_encoding(path: &str) -> Result<Detection> {
    FileAccess::default().detect_encoding(path)
}

/// Converts `input` into `output` in memory.
///
/// # Example
/// ```no_run
/// use fenc::convenience::convert;
/// use std::path::Path;
///
/// convert("legacy.txt", Path::new("legacy.utf8.txt"), "windows-1252", "UTF-8").unwrap();
/// ```
pub fn convert(input: &str, output: &Path, from: &str, to: &str) -> Result<()> {
    let (from, to) = lookup_pair(from, to)?;
    FileAccess::default().convert(input, output, from, to)
}

/// Converts `input` into `output` through bounded buffers.
pub fn convert_streaming(input: &str, output: &Path, from: &str, to: &str) -> Result<u64> {
    let (from, to) = lookup_pair(from, to)?;
    FileAccess::default().convert_streaming(input, output, from, to)
}

fn lookup_pair(from: &str, to: &str) -> Result<(Charset, Charset)> {
    Ok((Charset::for_label(from)?, Charset::for_label(to)?))
}
