use std::fmt;

use lnk_wire::WireError;
use lnk_wire::record_frame::{RECORD_HEADER_LEN, RecordFrame};

use crate::block_kind::BlockKind;
use crate::dump::hex_dump;
use crate::error::TypeError;

/// One record of the extra-data region, classified but not interpreted.
///
/// `ExtraDataBlock` sits between the wire layer (`RecordFrame` from
/// `lnk-wire`) and whoever consumes the section. The decoder builds one
/// from each frame it reads; the encoder turns it back into a frame.
///
/// Fields are private so the framing invariants hold for every value:
/// `size >= 8`, `size == 8 + data.len()`, and `kind` is the
/// classification of `signature`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtraDataBlock {
  size: u32,
  signature: u32,
  kind: BlockKind,
  data: Vec<u8>,
  object: BlockObject,
}

/// Structured content decoded from a block's payload.
///
/// Only `Raw` exists today: payloads are kept as bytes and nothing is
/// interpreted. Per-kind variants (console settings, tracker ids, known
/// folder GUIDs, ...) slot in here as they get decoders, without
/// changing the shape of [`ExtraDataBlock`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlockObject {
  /// Payload left as raw bytes in [`ExtraDataBlock::data`].
  #[default]
  Raw,
}

impl ExtraDataBlock {
  /// Build a block from a signature and payload.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::Wire`] if the payload is too long for a
  /// record size field.
  pub fn new(signature: u32, data: Vec<u8>) -> Result<Self, TypeError> {
    Ok(Self::try_from(RecordFrame::new(signature, data)?)?)
  }

  /// Total record length on the wire, header included.
  #[must_use]
  pub fn size(&self) -> u32 {
    self.size
  }

  #[must_use]
  pub fn signature(&self) -> u32 {
    self.signature
  }

  #[must_use]
  pub fn kind(&self) -> BlockKind {
    self.kind
  }

  /// The raw payload, `size - 8` bytes.
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  #[must_use]
  pub fn object(&self) -> &BlockObject {
    &self.object
  }

  /// Hex dump of the payload. See [`hex_dump`].
  #[must_use]
  pub fn dump(&self) -> String {
    hex_dump(&self.data)
  }

  /// Turn the block back into its wire frame.
  #[must_use]
  pub fn to_frame(&self) -> RecordFrame {
    RecordFrame {
      size: self.size,
      signature: self.signature,
      payload: self.data.clone(),
    }
  }

  #[must_use]
  pub fn into_data(self) -> Vec<u8> {
    self.data
  }
}

impl TryFrom<RecordFrame> for ExtraDataBlock {
  type Error = WireError;

  /// Classify a frame read off the wire.
  ///
  /// `RecordFrame` has public fields, so the framing invariants are
  /// checked here. Offsets in the errors are relative to the frame.
  ///
  /// # Errors
  ///
  /// - [`WireError::MalformedSize`] if `size < 8`.
  /// - [`WireError::SizeMismatch`] if `size != 8 + payload.len()`.
  fn try_from(frame: RecordFrame) -> Result<Self, Self::Error> {
    if frame.size < RECORD_HEADER_LEN {
      return Err(WireError::MalformedSize {
        size: frame.size,
        offset: 0,
      });
    }
    if frame.size as usize - RECORD_HEADER_LEN as usize != frame.payload.len() {
      return Err(WireError::SizeMismatch {
        declared: frame.size,
        payload_len: frame.payload.len(),
      });
    }

    Ok(Self {
      size: frame.size,
      signature: frame.signature,
      kind: BlockKind::from_signature(frame.signature),
      data: frame.payload,
      object: BlockObject::Raw,
    })
  }
}

impl fmt::Display for ExtraDataBlock {
  /// The per-block listing used by the section display:
  ///
  /// ```text
  /// Size: 16 (0x10)
  /// Signature: 0xA0000005
  /// Type: SpecialFolderDataBlock
  /// Dump
  /// 00000000  ...
  /// ```
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Size: {} ({:#X})", self.size, self.size)?;
    writeln!(f, "Signature: {:#010X}", self.signature)?;
    writeln!(f, "Type: {}", self.kind)?;
    writeln!(f, "Dump")?;
    f.write_str(&self.dump())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use lnk_wire::record_frame::signature;

  #[test]
  fn new_derives_size_and_kind() {
    let block = ExtraDataBlock::new(signature::SPECIAL_FOLDER, vec![0; 8]).unwrap();
    assert_eq!(block.size(), 16);
    assert_eq!(block.kind(), BlockKind::SpecialFolder);
    assert_eq!(block.object(), &BlockObject::Raw);
  }

  #[test]
  fn from_frame_keeps_payload() {
    let frame = RecordFrame::new(0xDEAD_BEEF, b"opaque".to_vec()).unwrap();
    let block = ExtraDataBlock::try_from(frame.clone()).unwrap();
    assert_eq!(block.kind(), BlockKind::Unknown(0xDEAD_BEEF));
    assert_eq!(block.data(), b"opaque");
    assert_eq!(block.to_frame(), frame);
  }

  #[test]
  fn frame_below_header_size_rejected() {
    let frame = RecordFrame {
      size: 0,
      signature: signature::ENVIRONMENT_VARIABLE,
      payload: vec![1, 2, 3],
    };
    let err = ExtraDataBlock::try_from(frame).unwrap_err();
    assert!(matches!(err, WireError::MalformedSize { size: 0, .. }));
  }

  #[test]
  fn frame_size_must_match_payload() {
    let frame = RecordFrame {
      size: 16,
      signature: signature::SPECIAL_FOLDER,
      payload: vec![0; 3],
    };
    let err = ExtraDataBlock::try_from(frame).unwrap_err();
    assert!(matches!(
      err,
      WireError::SizeMismatch {
        declared: 16,
        payload_len: 3
      }
    ));
  }

  #[test]
  fn empty_payload_has_empty_dump() {
    let block = ExtraDataBlock::new(signature::ENVIRONMENT_VARIABLE, vec![]).unwrap();
    assert_eq!(block.size(), 8);
    assert!(block.dump().is_empty());
  }

  #[test]
  fn display_lists_fields() {
    let block = ExtraDataBlock::new(signature::SHIM, b"AB".to_vec()).unwrap();
    let text = block.to_string();
    assert!(text.starts_with("Size: 10 (0xA)\nSignature: 0xA0000008\nType: ShimDataBlock\nDump\n"));
    assert!(text.ends_with("|AB|\n"));
  }
}
