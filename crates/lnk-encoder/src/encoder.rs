use std::io::Write;

use lnk_types::{BlockKind, ExtraDataSection};
use lnk_wire::record_frame::{RecordFrame, TERMINAL_LIMIT, write_terminal};

use crate::error::EncodeError;

/// Builder for an extra-data region.
///
/// Blocks are framed in the order they are added, followed by the
/// terminator (0 unless [`with_terminal`](Self::with_terminal) says
/// otherwise). The builder methods return `&mut Self` so calls chain:
///
/// ```rust
/// use lnk_encoder::ExtraDataEncoder;
/// use lnk_types::BlockKind;
///
/// let bytes = ExtraDataEncoder::new()
///     .add_block(BlockKind::KnownFolder, &[0u8; 20])
///     .add_raw(0xDEAD_BEEF, b"future block")
///     .encode()
///     .unwrap();
///
/// assert_eq!(bytes.len(), 28 + 20 + 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExtraDataEncoder {
    blocks: Vec<PendingBlock>,
    terminal: u32,
}

#[derive(Clone, Debug)]
struct PendingBlock {
    signature: u32,
    payload: Vec<u8>,
}

impl ExtraDataEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an encoder with every block of a decoded section and its
    /// terminal value (0 for a partial section).
    #[must_use]
    pub fn from_section(section: &ExtraDataSection) -> Self {
        let mut encoder = Self::new();
        for block in section {
            encoder.add_raw(block.signature(), block.data());
        }
        encoder.with_terminal(section.terminal_block().unwrap_or(0));
        encoder
    }

    /// Append a block of the given kind.
    pub fn add_block(&mut self, kind: BlockKind, payload: &[u8]) -> &mut Self {
        self.add_raw(kind.signature(), payload)
    }

    /// Append a block with an arbitrary signature.
    pub fn add_raw(&mut self, signature: u32, payload: &[u8]) -> &mut Self {
        self.blocks.push(PendingBlock {
            signature,
            payload: payload.to_vec(),
        });
        self
    }

    /// Set the terminator value. Validated by [`encode`](Self::encode).
    pub fn with_terminal(&mut self, value: u32) -> &mut Self {
        self.terminal = value;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Encode into a fresh byte vector.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::InvalidTerminal`] if the terminal value is not below 4.
    /// - [`EncodeError::Wire`] if a payload is too large for a size field.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.encoded_len_hint());
        self.write_to(&mut out)?;
        Ok(out)
    }

    /// Encode into a writer.
    ///
    /// The terminal value is checked before anything is written, so an
    /// invalid terminator never leaves a half-written region behind.
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode), plus [`EncodeError::Wire`] for
    /// writer failures.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, EncodeError> {
        if self.terminal >= TERMINAL_LIMIT {
            return Err(EncodeError::InvalidTerminal {
                value: self.terminal,
            });
        }

        let mut written = 0;
        for block in &self.blocks {
            let frame = RecordFrame::new(block.signature, block.payload.clone())?;
            written += frame.write_to(w)?;
        }
        written += write_terminal(w, self.terminal)?;
        w.flush()?;

        Ok(written)
    }

    fn encoded_len_hint(&self) -> usize {
        self.blocks.iter().map(|b| b.payload.len() + 8).sum::<usize>() + 4
    }
}
