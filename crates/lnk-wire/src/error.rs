use std::fmt;
use std::io;

/// The framing field being read when a stream ran dry.
///
/// Every record is read in three phases (size, signature, payload), and
/// the terminator is read in the size phase. Carrying the phase in
/// [`WireError::UnexpectedEof`] tells the caller exactly where a
/// truncated extra-data region gave out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadPhase {
    Size,
    Signature,
    Payload,
}

impl ReadPhase {
    /// Lowercase field name, as used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Signature => "signature",
            Self::Payload => "payload",
        }
    }
}

impl fmt::Display for ReadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reading {}", self.as_str())
    }
}

/// Errors raised while framing or unframing extra-data records.
///
/// ```text
/// ┌──────────────────┬───────────────────────────────────────────────┐
/// │ Variant          │ Cause                                         │
/// ├──────────────────┼───────────────────────────────────────────────┤
/// │ UnexpectedEof    │ stream ended inside a size/signature/payload  │
/// │ MalformedSize    │ declared size 4..=7, smaller than the header  │
/// │ PayloadTooLarge  │ payload does not fit the u32 size field       │
/// │ SizeMismatch     │ frame size disagrees with its payload length  │
/// │ InvalidTerminal  │ terminator value is not below 4               │
/// │ Io               │ any other reader/writer failure               │
/// └──────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before the field being read was complete.
    ///
    /// `offset` is the byte position (relative to the start of the
    /// extra-data region) where the incomplete field begins.
    #[error("unexpected end of input {phase} at offset {offset}")]
    UnexpectedEof { phase: ReadPhase, offset: u64 },

    /// Declared record size cannot hold the 8-byte size+signature header.
    #[error("malformed record at offset {offset}: size {size} is below the 8-byte header")]
    MalformedSize { size: u32, offset: u64 },

    /// Payload is longer than a u32 size field can describe.
    #[error("payload of {len} bytes does not fit a record size field")]
    PayloadTooLarge { len: usize },

    /// A frame's `size` does not equal `8 + payload.len()`.
    #[error("record size {declared} does not match payload length {payload_len} + 8")]
    SizeMismatch { declared: u32, payload_len: usize },

    /// Terminator values must be below 4, or a reader would take them for a record.
    #[error("terminal value {value:#010X} is not below 0x04")]
    InvalidTerminal { value: u32 },

    /// I/O error during read or write.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl WireError {
    /// Map a failed `read_exact` into a phase-tagged error.
    ///
    /// `UnexpectedEof` from the reader becomes
    /// [`WireError::UnexpectedEof`]; everything else passes through as
    /// [`WireError::Io`].
    pub fn from_read(err: io::Error, phase: ReadPhase, offset: u64) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof { phase, offset }
        } else {
            Self::Io(err)
        }
    }

    /// The framing phase for short-read errors, `None` otherwise.
    pub fn phase(&self) -> Option<ReadPhase> {
        match self {
            Self::UnexpectedEof { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
