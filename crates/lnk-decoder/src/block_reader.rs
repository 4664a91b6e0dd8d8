use std::io::{self, Read};

use lnk_types::ExtraDataBlock;
use lnk_wire::record_frame::{FrameHeader, RECORD_HEADER_LEN, RecordFrame, read_payload};

use crate::config::{DecoderConfig, TrailingDataPolicy};
use crate::error::DecodeError;

/// Pull-based reader over the extra-data region.
///
/// `BlockReader` wraps a byte stream positioned at the first record and
/// yields one [`ExtraDataBlock`] per call to `next`, reading only as
/// many bytes as framing dictates. Iteration ends after the terminator;
/// [`terminal`](Self::terminal) then reports its value.
///
/// On an error, the reader yields that error once and then fuses.
///
/// # Usage pattern
///
/// ```text
///   let mut reader = BlockReader::new(&mut stream);
///   for block in &mut reader {
///       let block = block?;
///       // ...
///   }
///   let terminal = reader.terminal();
/// ```
pub struct BlockReader<R> {
    reader: R,
    config: DecoderConfig,
    state: ReadState,
    /// Bytes consumed from `reader`, counting only fully read fields.
    offset: u64,
    terminal: Option<u32>,
}

/// Internal state machine.
///
/// ```text
///   ReadBlocks → Done
/// ```
///
/// `Done` is entered on the terminator or on the first error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReadState {
    ReadBlocks,
    Done,
}

impl<R: Read> BlockReader<R> {
    /// Create a reader with the default [`DecoderConfig`].
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            config,
            state: ReadState::ReadBlocks,
            offset: 0,
            terminal: None,
        }
    }

    /// The terminator's value, once it has been read.
    #[must_use]
    pub fn terminal(&self) -> Option<u32> {
        self.terminal
    }

    /// Bytes consumed so far by complete records and the terminator.
    ///
    /// Under `TrailingDataPolicy::Reject`, drained trailing bytes are not
    /// counted.
    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.offset
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == ReadState::Done
    }

    /// Give the underlying stream back, positioned wherever reading stopped.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next record, or `None` at the terminator.
    fn read_next(&mut self) -> Result<Option<ExtraDataBlock>, DecodeError> {
        let start = self.offset;

        let header = FrameHeader::read_from(&mut self.reader, start)?;
        let (size, signature) = match header {
            FrameHeader::Terminal(value) => {
                self.offset += u64::from(header.wire_len());
                self.terminal = Some(value);
                tracing::debug!(offset = start, terminal = value, "reached terminal block");
                self.check_trailing()?;
                return Ok(None);
            }
            FrameHeader::Record { size, signature } => (size, signature),
        };

        if let Some(limit) = self.config.max_block_size
            && size > limit
        {
            return Err(DecodeError::BlockTooLarge {
                size,
                limit,
                offset: start,
            });
        }

        let payload_offset = start + u64::from(RECORD_HEADER_LEN);
        let payload = read_payload(&mut self.reader, size - RECORD_HEADER_LEN, payload_offset)?;
        self.offset = start + u64::from(size);

        let block = ExtraDataBlock::try_from(RecordFrame {
            size,
            signature,
            payload,
        })?;
        tracing::debug!(
            offset = start,
            size,
            signature,
            kind = %block.kind(),
            "read extra data block"
        );

        Ok(Some(block))
    }

    /// Apply the trailing-data policy after the terminator.
    fn check_trailing(&mut self) -> Result<(), DecodeError> {
        match self.config.trailing_data {
            TrailingDataPolicy::Ignore => Ok(()),
            TrailingDataPolicy::Reject => {
                let extra_bytes = io::copy(&mut self.reader, &mut io::sink())
                    .map_err(lnk_wire::WireError::from)?;
                tracing::trace!(extra_bytes, "checked for trailing data");
                if extra_bytes == 0 {
                    Ok(())
                } else {
                    Err(DecodeError::TrailingData { extra_bytes })
                }
            }
        }
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Result<ExtraDataBlock, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ReadState::Done {
            return None;
        }

        match self.read_next() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.state = ReadState::Done;
                None
            }
            Err(e) => {
                self.state = ReadState::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> std::iter::FusedIterator for BlockReader<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use lnk_types::BlockKind;
    use lnk_wire::ReadPhase;
    use std::io::Cursor;

    fn bytes(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn terminator_only() {
        let data = bytes("03000000");
        let mut reader = BlockReader::new(Cursor::new(&data));
        assert!(reader.next().is_none());
        assert_eq!(reader.terminal(), Some(3));
        assert_eq!(reader.bytes_consumed(), 4);
        assert!(reader.is_done());
    }

    #[test]
    fn yields_blocks_in_order() {
        let data = bytes(
            "08000000010000a0\
             0a000000000000a0beef\
             00000000",
        );
        let mut reader = BlockReader::new(Cursor::new(&data));

        let first = reader.next().unwrap().unwrap();
        assert_eq!(first.kind(), BlockKind::EnvironmentVariable);
        assert!(first.data().is_empty());
        assert_eq!(reader.bytes_consumed(), 8);

        let second = reader.next().unwrap().unwrap();
        assert_eq!(second.kind(), BlockKind::Unknown(0xA000_0000));
        assert_eq!(second.data(), [0xBE, 0xEF]);

        assert!(reader.next().is_none());
        assert_eq!(reader.terminal(), Some(0));
        assert_eq!(reader.bytes_consumed(), data.len() as u64);
    }

    #[test]
    fn error_fuses_reader() {
        let data = bytes("05000000");
        let mut reader = BlockReader::new(Cursor::new(&data));
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.is_malformed());
        assert!(reader.next().is_none());
        assert_eq!(reader.terminal(), None);
    }

    #[test]
    fn stops_at_terminator_and_leaves_rest() {
        let data = bytes("00000000cafebabe");
        let mut reader = BlockReader::new(Cursor::new(&data));
        assert!(reader.next().is_none());
        let cursor = reader.into_inner();
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn reject_policy_counts_trailing_bytes() {
        let data = bytes("00000000cafebabe");
        let config = DecoderConfig {
            trailing_data: TrailingDataPolicy::Reject,
            ..DecoderConfig::default()
        };
        let mut reader = BlockReader::with_config(Cursor::new(&data), config);
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, DecodeError::TrailingData { extra_bytes: 4 }));
        assert_eq!(reader.terminal(), Some(0));
    }

    #[test]
    fn reject_policy_accepts_clean_end() {
        let data = bytes("01000000");
        let config = DecoderConfig::strict(1024);
        let mut reader = BlockReader::with_config(Cursor::new(&data), config);
        assert!(reader.next().is_none());
        assert_eq!(reader.terminal(), Some(1));
    }

    #[test]
    fn size_limit_checked_before_payload() {
        // Declares 0x100 bytes but carries none; the limit fires first.
        let data = bytes("0001000002000000");
        let config = DecoderConfig {
            max_block_size: Some(0x40),
            ..DecoderConfig::default()
        };
        let mut reader = BlockReader::with_config(Cursor::new(&data), config);
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BlockTooLarge {
                size: 0x100,
                limit: 0x40,
                offset: 0
            }
        ));
    }

    #[test]
    fn payload_short_read_reports_offset() {
        let data = bytes("10000000050000a0aabbcc");
        let mut reader = BlockReader::new(Cursor::new(&data));
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.phase(), Some(ReadPhase::Payload));
        assert!(matches!(
            err,
            DecodeError::Wire(lnk_wire::WireError::UnexpectedEof { offset: 8, .. })
        ));
    }
}
