use std::fmt;
use std::io::Write;

use lnk_wire::WireError;
use lnk_wire::record_frame::{SIZE_FIELD_LEN, write_terminal};

use crate::block::ExtraDataBlock;
use crate::block_kind::BlockKind;

/// The decoded extra-data region.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ ExtraDataSection                                         │
/// │   blocks:         Vec<ExtraDataBlock>  ← wire order      │
/// │   terminal_block: Option<u32>          ← value below 4   │
/// └──────────────────────────────────────────────────────────┘
/// ```
///
/// A section from a successful decode always has a terminal value. A
/// partial section (handed back next to a decode error) holds the blocks
/// read before the failure and `None`, unless the failure came after
/// the terminator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtraDataSection {
  blocks: Vec<ExtraDataBlock>,
  terminal_block: Option<u32>,
}

impl ExtraDataSection {
  /// A complete section ended by `terminal_block`.
  #[must_use]
  pub fn new(blocks: Vec<ExtraDataBlock>, terminal_block: u32) -> Self {
    Self {
      blocks,
      terminal_block: Some(terminal_block),
    }
  }

  /// A section that may not have reached its terminator.
  #[must_use]
  pub fn from_parts(blocks: Vec<ExtraDataBlock>, terminal_block: Option<u32>) -> Self {
    Self {
      blocks,
      terminal_block,
    }
  }

  /// Blocks in wire order.
  #[must_use]
  pub fn blocks(&self) -> &[ExtraDataBlock] {
    &self.blocks
  }

  /// The size-field value that ended the section, if it was reached.
  #[must_use]
  pub fn terminal_block(&self) -> Option<u32> {
    self.terminal_block
  }

  #[must_use]
  pub fn is_terminated(&self) -> bool {
    self.terminal_block.is_some()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.blocks.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.blocks.is_empty()
  }

  #[must_use]
  pub fn iter(&self) -> std::slice::Iter<'_, ExtraDataBlock> {
    self.blocks.iter()
  }

  /// First block of the given kind.
  #[must_use]
  pub fn find(&self, kind: BlockKind) -> Option<&ExtraDataBlock> {
    self.blocks.iter().find(|b| b.kind() == kind)
  }

  /// Bytes this section occupies on the wire: every block's size plus
  /// the 4-byte terminator when present.
  #[must_use]
  pub fn encoded_len(&self) -> u64 {
    let blocks: u64 = self.blocks.iter().map(|b| u64::from(b.size())).sum();
    let terminal = if self.terminal_block.is_some() {
      u64::from(SIZE_FIELD_LEN)
    } else {
      0
    };
    blocks + terminal
  }

  /// Re-frame the section: every block, then the terminator.
  ///
  /// A partial section writes only its blocks, which reproduces the
  /// bytes that were successfully framed before the decode failed.
  ///
  /// # Returns
  ///
  /// Total number of bytes written.
  ///
  /// # Errors
  ///
  /// - [`WireError::InvalidTerminal`] if the terminal value is not below 4.
  /// - [`WireError::Io`] if the writer fails.
  pub fn write_to(&self, w: &mut impl Write) -> Result<usize, WireError> {
    let mut written = 0;
    for block in &self.blocks {
      written += block.to_frame().write_to(w)?;
    }
    if let Some(value) = self.terminal_block {
      written += write_terminal(w, value)?;
    }
    Ok(written)
  }

  #[must_use]
  pub fn into_blocks(self) -> Vec<ExtraDataBlock> {
    self.blocks
  }
}

impl<'a> IntoIterator for &'a ExtraDataSection {
  type Item = &'a ExtraDataBlock;
  type IntoIter = std::slice::Iter<'a, ExtraDataBlock>;

  fn into_iter(self) -> Self::IntoIter {
    self.blocks.iter()
  }
}

impl fmt::Display for ExtraDataSection {
  /// Lists every block followed by a separator line, then the terminal value.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for block in &self.blocks {
      write!(f, "{block}")?;
      writeln!(f, "-------------------------")?;
    }
    match self.terminal_block {
      Some(value) => writeln!(f, "Terminal: {value:#010X}"),
      None => writeln!(f, "Terminal: missing"),
    }
  }
}
