#![warn(clippy::pedantic)]

pub mod error;
pub mod encoder;

pub use encoder::ExtraDataEncoder;
pub use error::EncodeError;
