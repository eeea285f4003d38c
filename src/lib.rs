//! Read files under any character encoding, detect encodings statistically,
//! and convert files between encodings in memory or by streaming.
//!
//! ```no_run
//! use fenc::{Charset, FileAccess, DEFAULT_ENCODING};
//! use std::path::Path;
//!
//! let access = FileAccess::default();
//! let detection = access.detect_encoding("/tmp/legacy.txt")?;
//! let big5 = Charset::for_label("Big5")?;
//! access.convert_streaming("/tmp/legacy.txt", Path::new("/tmp/out.txt"), detection.charset, big5)?;
//! let text = access.read_text("/tmp/out.txt", big5)?;
//! # let _ = (text, DEFAULT_ENCODING);
//! # Ok::<(), fenc::FencError>(())
//! ```

mod access;
mod core;
mod encoders;
mod features;

pub mod convenience;
pub mod prelude;

pub use crate::access::FileAccess;
pub use crate::core::charset::{Charset, DEFAULT_ENCODING, UTF_16BE, UTF_16LE, WINDOWS_1252, known_labels};
pub use crate::core::config::{
    DetectionSettings, FencConfig, ResourceSettings, Settings, StreamingSettings,
};
pub use crate::core::errors::{FencError, Result};
pub use crate::core::resolve::ResourceLocator;
pub use crate::encoders::streaming::{DEFAULT_BUFFER_SIZE, StreamingTranscoder, TranscodeStats};
pub use crate::encoders::text::{
    TextDecoder, TextEncoder, UNMAPPABLE_REPLACEMENT, decode_bytes, decode_bytes_strip_bom,
    encode_text,
};
pub use crate::features::{Confidence, Detection, detect_bytes, detect_reader};

pub use convenience::{convert, convert_streaming, detect_encoding, read_bytes, read_text};
