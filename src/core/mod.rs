pub mod charset;
pub mod config;
pub mod errors;
pub mod resolve;
