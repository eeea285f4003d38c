pub mod bytes;
pub mod config;
pub mod convert;
pub mod detect;
pub mod read;
