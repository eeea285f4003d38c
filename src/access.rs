//! File-level operations: read, detect and convert.

use crate::core::charset::Charset;
use crate::core::config::FencConfig;
use crate::core::errors::{FencError, Result};
use crate::core::resolve::ResourceLocator;
use crate::encoders::streaming::{StreamingTranscoder, TranscodeStats};
use crate::encoders::text::{decode_bytes, decode_bytes_strip_bom, encode_text};
use crate::features::detection::{Confidence, Detection, detect_bytes, detect_reader};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Reads, detects and converts files, resolving names through a
/// [`ResourceLocator`].
///
/// Every call is independent; no state is kept between calls.
#[derive(Debug, Clone)]
pub struct FileAccess {
    config: FencConfig,
    locator: ResourceLocator,
}

impl Default for FileAccess {
    fn default() -> Self {
        FileAccess::new(FencConfig::default())
    }
}

impl FileAccess {
    /// Builds a file accessor whose resource search paths come from `config`.
    pub fn new(config: FencConfig) -> Self {
        let locator = ResourceLocator::new(config.resources.expanded_paths());
        FileAccess { config, locator }
    }

    /// Replaces the resource locator.
    pub fn with_locator(mut self, locator: ResourceLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn config(&self) -> &FencConfig {
        &self.config
    }

    pub fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// Resolves `path` to an existing regular file.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        self.locator.resolve(path)
    }

    /// Reads the whole file and decodes it under exactly `charset`.
    ///
    /// A byte-order mark is not stripped and shows up as a leading U+FEFF.
    /// Malformed input decodes to U+FFFD.
    pub fn read_text(&self, path: &str, charset: Charset) -> Result<String> {
        let resolved = self.resolve(path)?;
        let bytes = read_file(&resolved)?;
        let (text, lossy) = decode_bytes(&bytes, charset);
        if lossy {
            warn!(
                "{} contains bytes that are not valid {}; replaced with U+FFFD",
                resolved.display(),
                charset
            );
        }
        Ok(text)
    }

    /// Detects the file's encoding, then decodes it under that encoding.
    ///
    /// When the answer came from a byte-order mark, the mark is removed.
    pub fn read_text_detected(&self, path: &str) -> Result<(Detection, String)> {
        let resolved = self.resolve(path)?;
        let bytes = read_file(&resolved)?;
        let detection = detect_bytes(&bytes, &self.config.detection);

        let (text, lossy) = if detection.confidence == Confidence::Bom {
            decode_bytes_strip_bom(&bytes, detection.charset)
        } else {
            decode_bytes(&bytes, detection.charset)
        };
        if lossy {
            warn!(
                "{} is not entirely valid {}; replaced with U+FFFD",
                resolved.display(),
                detection.charset
            );
        }
        Ok((detection, text))
    }

    /// Reads the file verbatim.
    pub fn read_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve(path)?;
        read_file(&resolved)
    }

    /// Detects the probable encoding of the file.
    pub fn detect_encoding(&self, path: &str) -> Result<Detection> {
        let resolved = self.resolve(path)?;
        self.detect_path(&resolved)
    }

    /// Converts `input` from `from` to `to` in memory, writing `output`.
    ///
    /// `output` is a plain filesystem path; it is created or truncated.
    pub fn convert(&self, input: &str, output: &Path, from: Charset, to: Charset) -> Result<()> {
        let resolved = self.resolve(input)?;
        let bytes = read_file(&resolved)?;

        let (text, lossy) = decode_bytes(&bytes, from);
        if lossy {
            warn!("{} is not entirely valid {}", resolved.display(), from);
        }
        let (encoded, unmappable) = encode_text(&text, to);
        if unmappable {
            warn!("some characters cannot be represented in {}; wrote '?'", to);
        }

        fs::write(output, &encoded).map_err(|e| FencError::write(output, e))?;
        debug!(
            "converted {} ({}) -> {} ({}), {} bytes",
            resolved.display(),
            from,
            output.display(),
            to,
            encoded.len()
        );
        Ok(())
    }

    /// Converts `input` from `from` to `to` through bounded buffers.
    ///
    /// Produces the same bytes as [`FileAccess::convert`]. Returns the number
    /// of bytes written. A failure part way through leaves a partial output.
    ///
    /// When `output` is the input file itself, the result is staged in a
    /// temporary file next to it and renamed over it once complete.
    pub fn convert_streaming(
        &self,
        input: &str,
        output: &Path,
        from: Charset,
        to: Charset,
    ) -> Result<u64> {
        let resolved = self.resolve(input)?;
        let source = File::open(&resolved).map_err(|e| FencError::io(&resolved, e))?;
        let mut reader = BufReader::with_capacity(self.config.streaming.buffer_size, source);

        let stats = match same_file(&resolved, output) {
            Some(target) => {
                debug!("{} is both input and output, staging", target.display());
                self.transcode_in_place(reader, &target, from, to)?
            }
            None => {
                let sink = File::create(output).map_err(|e| FencError::write(output, e))?;
                self.transcode_to(&mut reader, &sink, output, from, to)?
            }
        };

        report_stats(&resolved, output, from, to, &stats);
        Ok(stats.bytes_written)
    }

    fn transcode_to<R: Read>(
        &self,
        reader: &mut R,
        sink: &File,
        output: &Path,
        from: Charset,
        to: Charset,
    ) -> Result<TranscodeStats> {
        let buffer_size = self.config.streaming.buffer_size;
        let writer = BufWriter::with_capacity(buffer_size, sink);
        StreamingTranscoder::new(from, to, writer)
            .with_buffer_size(buffer_size)
            .transcode(reader)
            .map_err(|e| FencError::write(output, e))
    }

    /// Transcodes into a sibling temporary file, then replaces `target`.
    fn transcode_in_place<R: Read>(
        &self,
        mut reader: R,
        target: &Path,
        from: Charset,
        to: Charset,
    ) -> Result<TranscodeStats> {
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let staging = NamedTempFile::new_in(dir).map_err(|e| FencError::write(target, e))?;
        let stats = self.transcode_to(&mut reader, staging.as_file(), target, from, to)?;
        drop(reader);

        let permissions = fs::metadata(target)
            .map_err(|e| FencError::write(target, e))?
            .permissions();
        fs::set_permissions(staging.path(), permissions)
            .map_err(|e| FencError::write(target, e))?;
        staging
            .persist(target)
            .map_err(|e| FencError::write(target, e.error))?;
        Ok(stats)
    }

    fn detect_path(&self, path: &Path) -> Result<Detection> {
        let file = File::open(path).map_err(|e| FencError::io(path, e))?;
        let mut reader = BufReader::new(file);
        detect_reader(&mut reader, &self.config.detection).map_err(|e| FencError::io(path, e))
    }
}

/// Canonical path of `output` when it names the same file as `input`.
fn same_file(input: &Path, output: &Path) -> Option<PathBuf> {
    let input = fs::canonicalize(input).ok()?;
    let output = fs::canonicalize(output).ok()?;
    (input == output).then_some(output)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| FencError::io(path, e))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

fn report_stats(input: &Path, output: &Path, from: Charset, to: Charset, stats: &TranscodeStats) {
    if stats.replaced {
        warn!("{} is not entirely valid {}", input.display(), from);
    }
    if stats.unmappable > 0 {
        warn!(
            "{} characters cannot be represented in {}; wrote '?'",
            stats.unmappable, to
        );
    }
    debug!(
        "streamed {} ({}) -> {} ({}), {} bytes in, {} bytes out",
        input.display(),
        from,
        output.display(),
        to,
        stats.bytes_read,
        stats.bytes_written
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::charset::{DEFAULT_ENCODING, UTF_16BE, WINDOWS_1252};

    fn access_in(dir: &Path) -> FileAccess {
        FileAccess::default().with_locator(ResourceLocator::new(vec![dir.to_path_buf()]))
    }

    #[test]
    fn test_read_text_by_resource_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "héllo").unwrap();

        let access = access_in(dir.path());
        assert_eq!(access.read_text("hello.txt", DEFAULT_ENCODING).unwrap(), "héllo");
    }

    #[test]
    fn test_read_text_keeps_bom() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bom.txt"), b"\xEF\xBB\xBFhi").unwrap();

        let access = access_in(dir.path());
        let text = access.read_text("bom.txt", DEFAULT_ENCODING).unwrap();
        assert_eq!(text, "\u{FEFF}hi");
    }

    #[test]
    fn test_read_text_detected_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend(encode_text("wide", UTF_16BE).0);
        fs::write(dir.path().join("wide.txt"), &bytes).unwrap();

        let access = access_in(dir.path());
        let (detection, text) = access.read_text_detected("wide.txt").unwrap();
        assert_eq!(detection.charset, UTF_16BE);
        assert_eq!(text, "wide");
    }

    #[test]
    fn test_convert_creates_output_in_target_encoding() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("in.txt"), "naïve €").unwrap();
        let output = dir.path().join("out.txt");

        let access = access_in(dir.path());
        access
            .convert("in.txt", &output, DEFAULT_ENCODING, WINDOWS_1252)
            .unwrap();
        assert_eq!(fs::read(&output).unwrap(), b"na\xEFve \x80");
    }

    #[test]
    fn test_convert_streaming_matches_convert() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("in.txt"), "línea uno\r\nlínea dos\n".repeat(100)).unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");

        let access = access_in(dir.path());
        access.convert("in.txt", &a, DEFAULT_ENCODING, UTF_16BE).unwrap();
        let written = access
            .convert_streaming("in.txt", &b, DEFAULT_ENCODING, UTF_16BE)
            .unwrap();

        let expected = fs::read(&a).unwrap();
        assert_eq!(fs::read(&b).unwrap(), expected);
        assert_eq!(written, expected.len() as u64);
    }

    #[test]
    fn test_convert_in_place_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let access = access_in(dir.path());
        let text = "hello wörld\r\n".repeat(50);
        let (expected, _) = encode_text(&text, UTF_16BE);

        for stream in [false, true] {
            let file = dir.path().join("same.txt");
            fs::write(&file, &text).unwrap();
            let path = file.to_str().unwrap();

            if stream {
                let written = access
                    .convert_streaming(path, &file, DEFAULT_ENCODING, UTF_16BE)
                    .unwrap();
                assert_eq!(written, expected.len() as u64);
            } else {
                access.convert(path, &file, DEFAULT_ENCODING, UTF_16BE).unwrap();
            }
            assert_eq!(fs::read(&file).unwrap(), expected, "stream = {}", stream);
        }
    }

    #[test]
    fn test_convert_in_place_by_resource_name() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("named.txt");
        let access = access_in(dir.path());

        for stream in [false, true] {
            fs::write(&file, "naïve €").unwrap();
            if stream {
                access
                    .convert_streaming("named.txt", &file, DEFAULT_ENCODING, WINDOWS_1252)
                    .unwrap();
            } else {
                access
                    .convert("named.txt", &file, DEFAULT_ENCODING, WINDOWS_1252)
                    .unwrap();
            }
            assert_eq!(fs::read(&file).unwrap(), b"na\xEFve \x80", "stream = {}", stream);
        }

        // Nothing but the converted file is left behind
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_missing_output_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("in.txt"), "text").unwrap();
        let output = dir.path().join("nodir").join("out.txt");
        let access = access_in(dir.path());

        let err = access
            .convert("in.txt", &output, DEFAULT_ENCODING, UTF_16BE)
            .unwrap_err();
        assert!(matches!(err, FencError::Io { ref path, .. } if path == &output));

        let err = access
            .convert_streaming("in.txt", &output, DEFAULT_ENCODING, UTF_16BE)
            .unwrap_err();
        assert!(matches!(err, FencError::Io { ref path, .. } if path == &output));
    }

    #[test]
    fn test_missing_input_does_not_create_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let access = access_in(dir.path());
        let err = access
            .convert_streaming("missing.txt", &output, DEFAULT_ENCODING, WINDOWS_1252)
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!output.exists());
    }
}
