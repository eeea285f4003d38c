use crate::core::charset::{Charset, DEFAULT_ENCODING};
use crate::core::config::DetectionSettings;
use chardetng::EncodingDetector;
use encoding_rs::ISO_2022_JP;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::io::{self, ErrorKind, Read};

/// How a detection answer was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// The input starts with a byte-order mark.
    Bom,
    /// The statistical detector saw non-ASCII evidence and made a guess.
    Statistical,
    /// No evidence at all (empty or plain ASCII input); the answer is
    /// [`DEFAULT_ENCODING`].
    Fallback,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Bom => "bom",
            Confidence::Statistical => "statistical",
            Confidence::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of encoding detection. Always carries an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub charset: Charset,
    pub confidence: Confidence,
    /// Length of the leading BOM, when `confidence` is `Bom`
    pub bom_length: usize,
}

impl Detection {
    pub fn name(&self) -> &'static str {
        self.charset.name()
    }

    fn fallback() -> Self {
        Detection {
            charset: DEFAULT_ENCODING,
            confidence: Confidence::Fallback,
            bom_length: 0,
        }
    }
}

/// Detects the encoding of everything `reader` yields.
///
/// A leading BOM settles the answer immediately. Otherwise the input is fed
/// to the statistical detector in `settings.chunk_size` pieces until it is
/// exhausted. Input with no non-ASCII bytes (unless its escapes spell ISO-2022-JP) gives
/// the detector nothing to go on, so it yields [`Confidence::Fallback`].
pub fn detect_reader<R: Read>(reader: &mut R, settings: &DetectionSettings) -> io::Result<Detection> {
    let chunk_size = settings.chunk_size.max(4);
    let mut buffer = vec![0u8; chunk_size];

    let filled = fill(reader, &mut buffer)?;
    if filled == 0 {
        debug!("empty input, falling back to {}", DEFAULT_ENCODING);
        return Ok(Detection::fallback());
    }

    if let Some((charset, bom_length)) = Charset::for_bom(&buffer[..filled]) {
        debug!("byte-order mark identifies {}", charset);
        return Ok(Detection {
            charset,
            confidence: Confidence::Bom,
            bom_length,
        });
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&buffer[..filled], false);
    let mut total = filled as u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if n == 0 {
            break;
        }
        total += n as u64;
        detector.feed(&buffer[..n], false);
    }
    let non_ascii = detector.feed(&[], true);

    let tld = settings.tld.as_deref().map(str::as_bytes);
    let guess = detector.guess(tld, settings.allow_utf8);

    // 7-bit input only counts as evidence when its escapes make it ISO-2022-JP
    if !non_ascii && guess != ISO_2022_JP {
        debug!("{} bytes of plain ASCII, falling back to {}", total, DEFAULT_ENCODING);
        return Ok(Detection::fallback());
    }
    debug!("detector guessed {} after {} bytes", guess.name(), total);

    Ok(Detection {
        charset: Charset::from(guess),
        confidence: Confidence::Statistical,
        bom_length: 0,
    })
}

/// Detects the encoding of an in-memory buffer.
pub fn detect_bytes(bytes: &[u8], settings: &DetectionSettings) -> Detection {
    let mut reader = bytes;
    // Reading from a slice cannot fail
    detect_reader(&mut reader, settings).unwrap_or_else(|_| Detection::fallback())
}

/// Reads until `buffer` is full or the input ends.
fn fill<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
