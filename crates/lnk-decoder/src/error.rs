use lnk_types::ExtraDataSection;
use lnk_wire::{ReadPhase, WireError};

/// Errors that can occur while decoding the extra-data region.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── BlockTooLarge         ← declared size over DecoderConfig::max_block_size
///   ├── TrailingData          ← bytes after the terminator (Reject policy only)
///   └── Wire(WireError)       ← from lnk-wire framing
///         ├── UnexpectedEof   ← short read, tagged size/signature/payload
///         ├── MalformedSize   ← declared size 4..=7
///         └── Io              ← any other reader failure
/// ```
///
/// An unknown signature is never an error; it decodes to
/// `BlockKind::Unknown`.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A record declared a size above the configured limit.
    #[error("record size {size} at offset {offset} exceeds limit {limit}")]
    BlockTooLarge { size: u32, limit: u32, offset: u64 },

    /// Bytes were found after the terminator.
    ///
    /// Only raised under `TrailingDataPolicy::Reject`; the default policy
    /// never looks past the terminator.
    #[error("unexpected data after terminal block ({extra_bytes} bytes)")]
    TrailingData { extra_bytes: u64 },

    /// A framing error from `lnk-wire`.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl DecodeError {
    /// The framing phase of a short read, `None` for every other error.
    #[must_use]
    pub fn phase(&self) -> Option<ReadPhase> {
        match self {
            Self::Wire(wire) => wire.phase(),
            _ => None,
        }
    }

    /// Whether the stream declared a record too small for its own header.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Wire(WireError::MalformedSize { .. }))
    }
}

/// A failed decode together with everything read before the failure.
///
/// The underlying [`DecodeError`] is reported through `source()`, not in
/// the message.
///
/// The blocks in `section` were fully framed and classified; the block
/// being read when the error hit is not among them. Whether a partial
/// section is still worth using is the caller's call.
#[derive(Debug, thiserror::Error)]
#[error("decode stopped after {} block(s)", .section.len())]
pub struct PartialDecode {
    section: ExtraDataSection,
    source: DecodeError,
}

impl PartialDecode {
    #[must_use]
    pub fn new(section: ExtraDataSection, source: DecodeError) -> Self {
        Self { section, source }
    }

    /// Blocks decoded before the failure.
    #[must_use]
    pub fn section(&self) -> &ExtraDataSection {
        &self.section
    }

    #[must_use]
    pub fn error(&self) -> &DecodeError {
        &self.source
    }

    #[must_use]
    pub fn into_parts(self) -> (ExtraDataSection, DecodeError) {
        (self.section, self.source)
    }
}

/// Errors surfaced by a shell-link loader that embeds this decoder.
///
/// Each section of the container contributes its own variant, prefixed
/// with the section it came from.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LnkError {
    #[error("extra-data section: {0}")]
    ExtraData(#[from] PartialDecode),
}

impl LnkError {
    /// The partial extra-data section, when the error came from there.
    #[must_use]
    pub fn partial_extra_data(&self) -> Option<&ExtraDataSection> {
        match self {
            Self::ExtraData(partial) => Some(partial.section()),
        }
    }
}
