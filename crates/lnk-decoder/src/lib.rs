#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod block_reader;
pub mod decoder;

pub use block_reader::BlockReader;
pub use config::{DecoderConfig, TrailingDataPolicy};
pub use decoder::ExtraDataDecoder;
pub use error::{DecodeError, LnkError, PartialDecode};
