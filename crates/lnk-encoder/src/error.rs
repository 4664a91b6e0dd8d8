use lnk_wire::WireError;

/// Errors that can occur while encoding an extra-data region.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── InvalidTerminal     ← terminal value not below 4
///   ├── Wire(WireError)     ← from lnk-wire framing (oversized payload, ...)
///   └── Io(std::io::Error)  ← from the underlying writer
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("terminal value {value} must be below 4")]
    InvalidTerminal { value: u32 },

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
