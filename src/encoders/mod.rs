pub mod streaming;
pub mod text;
