mod transcoder;

pub use transcoder::{DEFAULT_BUFFER_SIZE, StreamingTranscoder, TranscodeStats};
