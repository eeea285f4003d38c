use crate::core::charset::Charset;
use encoding_rs::{CoderResult, Decoder, Encoder, EncoderResult};

/// Byte written in place of a character the target encoding cannot represent.
pub const UNMAPPABLE_REPLACEMENT: &str = "?";

/// Decodes `bytes` under exactly `charset`.
///
/// A byte-order mark is not sniffed or removed; it decodes to U+FEFF.
/// Malformed sequences become U+FFFD. Returns the text and whether any
/// replacement happened.
pub fn decode_bytes(bytes: &[u8], charset: Charset) -> (String, bool) {
    let (text, had_errors) = charset.encoding().decode_without_bom_handling(bytes);
    (text.into_owned(), had_errors)
}

/// Like [`decode_bytes`], but drops a leading BOM that matches `charset`.
pub fn decode_bytes_strip_bom(bytes: &[u8], charset: Charset) -> (String, bool) {
    let (text, had_errors) = charset.encoding().decode_with_bom_removal(bytes);
    (text.into_owned(), had_errors)
}

/// Encodes `text` into `charset`.
///
/// Characters the target cannot represent are written as `?`. Returns the
/// bytes and whether any such substitution happened.
pub fn encode_text(text: &str, charset: Charset) -> (Vec<u8>, bool) {
    let mut encoder = TextEncoder::new(charset);
    let mut out = Vec::with_capacity(text.len() + text.len() / 2);
    encoder.encode_into(text, &mut out, true);
    (out, encoder.had_unmappable())
}

/// Incremental decoder wrapper that always grows its destination enough.
pub struct TextDecoder {
    inner: Decoder,
    replaced: bool,
}

impl TextDecoder {
    pub fn new(charset: Charset) -> Self {
        TextDecoder {
            inner: charset.encoding().new_decoder_without_bom_handling(),
            replaced: false,
        }
    }

    /// Decodes `src`, appending to `dst`. Pass `last = true` exactly once, on
    /// the final chunk (which may be empty), so trailing partial sequences
    /// are flushed.
    pub fn decode_into(&mut self, src: &[u8], dst: &mut String, last: bool) {
        let mut remaining = src;
        loop {
            let needed = self
                .inner
                .max_utf8_buffer_length(remaining.len())
                .unwrap_or(remaining.len() * 3 + 16);
            dst.reserve(needed);

            let (result, read, replaced) = self.inner.decode_to_string(remaining, dst, last);
            self.replaced |= replaced;
            remaining = &remaining[read..];

            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
    }

    /// Whether any malformed input was replaced with U+FFFD so far.
    pub fn had_replacements(&self) -> bool {
        self.replaced
    }
}

enum EncoderKind {
    // The registry only decodes UTF-16, so these are written by hand
    Utf16 { big_endian: bool },
    Registry(Encoder),
}

/// Incremental encoder covering every codec in the registry.
pub struct TextEncoder {
    kind: EncoderKind,
    unmappable: usize,
}

impl TextEncoder {
    pub fn new(charset: Charset) -> Self {
        let kind = if charset.is_utf16() {
            EncoderKind::Utf16 {
                big_endian: charset == crate::core::charset::UTF_16BE,
            }
        } else {
            EncoderKind::Registry(charset.encoding().new_encoder())
        };
        TextEncoder {
            kind,
            unmappable: 0,
        }
    }

    /// Encodes `src`, appending to `dst`. Pass `last = true` on the final
    /// chunk so stateful encoders return to their initial state.
    pub fn encode_into(&mut self, src: &str, dst: &mut Vec<u8>, last: bool) {
        match &mut self.kind {
            EncoderKind::Utf16 { big_endian } => {
                dst.reserve(src.len() * 2);
                for unit in src.encode_utf16() {
                    let bytes = if *big_endian {
                        unit.to_be_bytes()
                    } else {
                        unit.to_le_bytes()
                    };
                    dst.extend_from_slice(&bytes);
                }
            }
            EncoderKind::Registry(encoder) => {
                self.unmappable += encode_registry(encoder, src, dst, last);
            }
        }
    }

    pub fn had_unmappable(&self) -> bool {
        self.unmappable > 0
    }

    /// Number of characters replaced with `?` so far.
    pub fn unmappable_count(&self) -> usize {
        self.unmappable
    }
}

fn encode_registry(encoder: &mut Encoder, src: &str, dst: &mut Vec<u8>, last: bool) -> usize {
    let mut unmappable = 0;
    let mut remaining = src;

    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(remaining.len())
            .unwrap_or(remaining.len() * 4 + 16)
            .max(16);
        let start = dst.len();
        dst.resize(start + needed, 0);

        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(remaining, &mut dst[start..], last);
        dst.truncate(start + written);
        remaining = &remaining[read..];

        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(_) => {
                unmappable += 1;
                // Routed through the encoder so stateful encoders switch back to ASCII
                encode_registry(encoder, UNMAPPABLE_REPLACEMENT, dst, false);
            }
        }
    }

    unmappable
}
