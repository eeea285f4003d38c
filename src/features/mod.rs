//! Optional features module.
//!
//! Encoding detection lives here, apart from the core read/decode/encode
//! functionality.

pub mod detection;

pub use detection::{Confidence, Detection, detect_bytes, detect_reader};
