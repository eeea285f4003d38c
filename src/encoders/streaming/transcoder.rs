use crate::core::charset::Charset;
use crate::encoders::text::{TextDecoder, TextEncoder};
use std::io::{ErrorKind, Read, Write};

/// Default read/write buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Counters gathered while transcoding a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscodeStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Malformed input was replaced with U+FFFD.
    pub replaced: bool,
    /// Characters written as `?` because the target cannot represent them.
    pub unmappable: usize,
}

/// Streaming transcoder for converting text between encodings.
///
/// Reads fixed-size chunks, decodes them incrementally, and encodes each
/// decoded piece straight to the writer, so memory use is bounded by the
/// buffer size rather than the input size. Bytes pass through unchanged
/// apart from the encoding; line terminators are not touched.
pub struct StreamingTranscoder<W: Write> {
    from: Charset,
    to: Charset,
    writer: W,
    buffer_size: usize,
}

impl<W: Write> StreamingTranscoder<W> {
    /// Creates a new streaming transcoder.
    ///
    /// # Arguments
    ///
    /// * `from` - Encoding of the input bytes
    /// * `to` - Encoding for the output bytes
    /// * `writer` - The destination for encoded output
    pub fn new(from: Charset, to: Charset, writer: W) -> Self {
        StreamingTranscoder {
            from,
            to,
            writer,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Sets the chunk size used for reads (clamped to at least 16 bytes).
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(16);
        self
    }

    /// Transcodes everything `reader` yields, then flushes the writer.
    pub fn transcode<R: Read>(&mut self, reader: &mut R) -> std::io::Result<TranscodeStats> {
        let mut decoder = TextDecoder::new(self.from);
        let mut encoder = TextEncoder::new(self.to);
        let mut stats = TranscodeStats::default();

        let mut buffer = vec![0u8; self.buffer_size];
        let mut text = String::with_capacity(self.buffer_size);
        let mut encoded = Vec::with_capacity(self.buffer_size * 2);

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            let last = bytes_read == 0;
            stats.bytes_read += bytes_read as u64;

            text.clear();
            decoder.decode_into(&buffer[..bytes_read], &mut text, last);

            encoded.clear();
            encoder.encode_into(&text, &mut encoded, last);
            self.writer.write_all(&encoded)?;
            stats.bytes_written += encoded.len() as u64;

            if last {
                break;
            }
        }

        self.writer.flush()?;
        stats.replaced = decoder.had_replacements();
        stats.unmappable = encoder.unmappable_count();
        Ok(stats)
    }

    /// Consumes the transcoder, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
