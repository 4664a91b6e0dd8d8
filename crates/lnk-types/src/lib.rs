#![warn(clippy::pedantic)]

pub mod error;
pub mod block_kind;
pub mod block;
pub mod section;
pub mod dump;

pub use block::{BlockObject, ExtraDataBlock};
pub use block_kind::{BlockKind, classify};
pub use dump::hex_dump;
pub use error::TypeError;
pub use section::ExtraDataSection;
