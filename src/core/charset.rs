use crate::core::errors::{FencError, Result, find_closest};
use encoding_rs::Encoding;
use std::fmt;
use std::str::FromStr;

/// Every codec the registry provides, by canonical name.
static ENCODINGS: &[&Encoding] = &[
    encoding_rs::UTF_8,
    encoding_rs::UTF_16LE,
    encoding_rs::UTF_16BE,
    encoding_rs::IBM866,
    encoding_rs::ISO_8859_2,
    encoding_rs::ISO_8859_3,
    encoding_rs::ISO_8859_4,
    encoding_rs::ISO_8859_5,
    encoding_rs::ISO_8859_6,
    encoding_rs::ISO_8859_7,
    encoding_rs::ISO_8859_8,
    encoding_rs::ISO_8859_8_I,
    encoding_rs::ISO_8859_10,
    encoding_rs::ISO_8859_13,
    encoding_rs::ISO_8859_14,
    encoding_rs::ISO_8859_15,
    encoding_rs::ISO_8859_16,
    encoding_rs::KOI8_R,
    encoding_rs::KOI8_U,
    encoding_rs::MACINTOSH,
    encoding_rs::WINDOWS_874,
    encoding_rs::WINDOWS_1250,
    encoding_rs::WINDOWS_1251,
    encoding_rs::WINDOWS_1252,
    encoding_rs::WINDOWS_1253,
    encoding_rs::WINDOWS_1254,
    encoding_rs::WINDOWS_1255,
    encoding_rs::WINDOWS_1256,
    encoding_rs::WINDOWS_1257,
    encoding_rs::WINDOWS_1258,
    encoding_rs::X_MAC_CYRILLIC,
    encoding_rs::GBK,
    encoding_rs::GB18030,
    encoding_rs::BIG5,
    encoding_rs::EUC_JP,
    encoding_rs::ISO_2022_JP,
    encoding_rs::SHIFT_JIS,
    encoding_rs::EUC_KR,
    encoding_rs::X_USER_DEFINED,
];

/// Common aliases offered as suggestions alongside canonical names.
const COMMON_ALIASES: &[&str] = &["utf8", "latin1", "ascii", "utf-16", "cp1252", "sjis"];

/// A named character encoding backed by the `encoding_rs` registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charset(&'static Encoding);

/// UTF-8, the encoding callers should pass when they have no better answer.
pub const DEFAULT_ENCODING: Charset = Charset(encoding_rs::UTF_8);

/// UTF-16 big endian.
pub const UTF_16BE: Charset = Charset(encoding_rs::UTF_16BE);

/// UTF-16 little endian.
pub const UTF_16LE: Charset = Charset(encoding_rs::UTF_16LE);

/// windows-1252, which the registry also answers for "latin1" and "ascii".
pub const WINDOWS_1252: Charset = Charset(encoding_rs::WINDOWS_1252);

impl Charset {
    /// Looks up a codec by label.
    ///
    /// Labels are matched case-insensitively with surrounding whitespace
    /// ignored. The "replacement" pseudo-encoding is not a codec and is
    /// rejected along with unknown labels.
    pub fn for_label(label: &str) -> Result<Self> {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(enc) if enc != encoding_rs::REPLACEMENT => Ok(Charset(enc)),
            _ => Err(FencError::UnsupportedEncoding {
                label: label.to_string(),
                suggestion: find_closest(
                    label.trim(),
                    known_labels().chain(COMMON_ALIASES.iter().copied()),
                ),
            }),
        }
    }

    /// Canonical registry name, e.g. "UTF-16BE" or "windows-1252".
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.0
    }

    pub fn is_utf8(&self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    pub fn is_utf16(&self) -> bool {
        self.0 == encoding_rs::UTF_16LE || self.0 == encoding_rs::UTF_16BE
    }

    /// Byte-order mark of this encoding, if it has one.
    pub fn bom(&self) -> Option<&'static [u8]> {
        if self.0 == encoding_rs::UTF_8 {
            Some(&[0xEF, 0xBB, 0xBF])
        } else if self.0 == encoding_rs::UTF_16LE {
            Some(&[0xFF, 0xFE])
        } else if self.0 == encoding_rs::UTF_16BE {
            Some(&[0xFE, 0xFF])
        } else {
            None
        }
    }

    /// Sniffs a leading byte-order mark, returning the encoding and BOM length.
    pub fn for_bom(bytes: &[u8]) -> Option<(Self, usize)> {
        Encoding::for_bom(bytes).map(|(enc, len)| (Charset(enc), len))
    }
}

impl From<&'static Encoding> for Charset {
    fn from(enc: &'static Encoding) -> Self {
        Charset(enc)
    }
}

impl FromStr for Charset {
    type Err = FencError;

    fn from_str(s: &str) -> Result<Self> {
        Charset::for_label(s)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical names of every supported codec.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    ENCODINGS.iter().map(|enc| enc.name())
}
