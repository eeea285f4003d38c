//! Convenient re-exports for common usage.
//!
//! # Example
//!
//! ```no_run
//! use fenc::prelude::*;
//!
//! let access = FileAccess::default();
//! let text = access.read_text("notes.txt", DEFAULT_ENCODING).unwrap();
//! println!("{}", text);
//! ```

pub use crate::{
    Charset,
    Confidence,
    DEFAULT_ENCODING,
    Detection,
    FencConfig,
    FencError,
    FileAccess,
    ResourceLocator,
    StreamingTranscoder,

    // Name-based entry points
    convert,
    convert_streaming,
    decode_bytes,
    detect_encoding,
    encode_text,
    read_bytes,
    read_text,
};
