#![warn(clippy::pedantic)]

pub mod error;
pub mod record_frame;

pub use error::{ReadPhase, WireError};
pub use record_frame::{FrameHeader, RecordFrame};
