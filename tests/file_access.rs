//! Library-level tests for file access, detection and conversion

use fenc::{
    Charset, Confidence, FencConfig, FencError, FileAccess, ResourceLocator, UTF_16BE, UTF_16LE,
    WINDOWS_1252,
};
use std::fs;
use std::path::Path;

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn charset(label: &str) -> Charset {
    Charset::for_label(label).unwrap()
}

// ============================================================================
// Path Resolution
// ============================================================================

#[test]
fn test_resource_name_found_in_search_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "resource body").unwrap();

    let access = FileAccess::default()
        .with_locator(ResourceLocator::new(vec![dir.path().to_path_buf()]));

    let text = access.read_text("notes.txt", fenc::DEFAULT_ENCODING).unwrap();
    assert_eq!(text, "resource body");
}

#[test]
fn test_first_search_path_wins() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    fs::write(first.path().join("dup.txt"), "first").unwrap();
    fs::write(second.path().join("dup.txt"), "second").unwrap();

    let access = FileAccess::default().with_locator(ResourceLocator::new(vec![
        first.path().to_path_buf(),
        second.path().to_path_buf(),
    ]));

    assert_eq!(access.read_bytes("dup.txt").unwrap(), b"first");
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = FileAccess::default()
        .read_bytes(path_str(dir.path()))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_missing_resource_name() {
    let dir = tempfile::tempdir().unwrap();
    let access = FileAccess::default()
        .with_locator(ResourceLocator::new(vec![dir.path().to_path_buf()]));

    match access.detect_encoding("nowhere.txt") {
        Err(FencError::FileNotFound { path }) => assert_eq!(path, Path::new("nowhere.txt")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

// ============================================================================
// Reading
// ============================================================================

#[test]
fn test_read_text_keeps_bom() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bom.txt");
    fs::write(&file, "\u{FEFF}hello").unwrap();

    let text = FileAccess::default()
        .read_text(path_str(&file), fenc::DEFAULT_ENCODING)
        .unwrap();
    assert_eq!(text, "\u{FEFF}hello");
}

#[test]
fn test_read_text_replaces_malformed_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.txt");
    fs::write(&file, b"ok\xFFok").unwrap();

    let text = FileAccess::default()
        .read_text(path_str(&file), fenc::DEFAULT_ENCODING)
        .unwrap();
    assert_eq!(text, "ok\u{FFFD}ok");
}

#[test]
fn test_read_text_detected_shift_jis() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("sjis.txt");
    let sample = "日本語のテキストです。これはシフトJISで書かれた文章です。";
    let (bytes, _) = fenc::encode_text(sample, charset("Shift_JIS"));
    fs::write(&file, bytes).unwrap();

    let (detection, text) = FileAccess::default()
        .read_text_detected(path_str(&file))
        .unwrap();
    assert_eq!(detection.name(), "Shift_JIS");
    assert_eq!(detection.confidence, Confidence::Statistical);
    assert_eq!(text, sample);
}

#[test]
fn test_read_bytes_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.bin");
    fs::write(&file, b"").unwrap();

    assert!(FileAccess::default().read_bytes(path_str(&file)).unwrap().is_empty());
}

// ============================================================================
// Detection
// ============================================================================

#[test]
fn test_detect_empty_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.txt");
    fs::write(&file, b"").unwrap();

    let detection = FileAccess::default().detect_encoding(path_str(&file)).unwrap();
    assert_eq!(detection.charset, fenc::DEFAULT_ENCODING);
    assert_eq!(detection.confidence, Confidence::Fallback);
}

#[test]
fn test_detect_utf16_boms() {
    let dir = tempfile::tempdir().unwrap();
    let be = dir.path().join("be.txt");
    let le = dir.path().join("le.txt");
    fs::write(&be, [0xFE, 0xFF, 0x00, b'a']).unwrap();
    fs::write(&le, [0xFF, 0xFE, b'a', 0x00]).unwrap();

    let access = FileAccess::default();
    let be = access.detect_encoding(path_str(&be)).unwrap();
    let le = access.detect_encoding(path_str(&le)).unwrap();
    assert_eq!(be.charset, UTF_16BE);
    assert_eq!(le.charset, UTF_16LE);
    assert_eq!(be.confidence, Confidence::Bom);
    assert_eq!(be.bom_length, 2);
}

#[test]
fn test_detect_windows_1252_text() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("latin.txt");
    let sample = "Le café était très animé, et la crème brûlée était délicieuse. Où est la forêt?";
    let (bytes, _) = fenc::encode_text(sample, WINDOWS_1252);
    fs::write(&file, bytes).unwrap();

    let detection = FileAccess::default().detect_encoding(path_str(&file)).unwrap();
    assert_eq!(detection.charset, WINDOWS_1252);
    assert_eq!(detection.confidence, Confidence::Statistical);
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_convert_replaces_unmappable_characters() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "a→b").unwrap();

    FileAccess::default()
        .convert(path_str(&input), &output, fenc::DEFAULT_ENCODING, charset("ISO-8859-1"))
        .unwrap();
    assert_eq!(fs::read(&output).unwrap(), b"a?b");
}

#[test]
fn test_convert_truncates_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "short").unwrap();
    fs::write(&output, "a much longer previous body").unwrap();

    FileAccess::default()
        .convert(path_str(&input), &output, fenc::DEFAULT_ENCODING, fenc::DEFAULT_ENCODING)
        .unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "short");
}

#[test]
fn test_convert_missing_input_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");

    let err = FileAccess::default()
        .convert("/definitely/not/here.txt", &output, UTF_16LE, UTF_16BE)
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!output.exists());
}

#[test]
fn test_streaming_matches_in_memory_with_small_buffers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let in_memory = dir.path().join("mem.txt");
    let streamed = dir.path().join("stream.txt");

    let sample = "Grüße aus Köln, 東京から、Привет! ".repeat(200);
    fs::write(&input, &sample).unwrap();

    let mut config = FencConfig::default();
    config.streaming.buffer_size = 17;
    let access = FileAccess::new(config);
    let gb18030 = charset("GB18030");

    access
        .convert(path_str(&input), &in_memory, fenc::DEFAULT_ENCODING, gb18030)
        .unwrap();
    let written = access
        .convert_streaming(path_str(&input), &streamed, fenc::DEFAULT_ENCODING, gb18030)
        .unwrap();

    let expected = fs::read(&in_memory).unwrap();
    assert_eq!(fs::read(&streamed).unwrap(), expected);
    assert_eq!(written, expected.len() as u64);
}

// ============================================================================
// Name-based helpers
// ============================================================================

#[test]
fn test_convenience_unknown_encoding() {
    let err = fenc::read_text("/definitely/not/here.txt", "klingon").unwrap_err();
    assert!(err.is_unsupported_encoding());
}

#[test]
fn test_convenience_convert_streaming_big5() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "中文測試").unwrap();

    fenc::convert_streaming(path_str(&input), &output, "utf-8", "big5").unwrap();
    let text = fenc::read_text(path_str(&output), "Big5").unwrap();
    assert_eq!(text, "中文測試");
}
