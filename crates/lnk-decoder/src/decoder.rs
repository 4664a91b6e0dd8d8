use std::io::Read;

use lnk_types::ExtraDataSection;

use crate::block_reader::BlockReader;
use crate::config::DecoderConfig;
use crate::error::PartialDecode;

/// Synchronous decoder for the extra-data region of a shell link.
///
/// The caller positions a stream at the first byte of the region (right
/// after the preceding section of the container) and hands it over by
/// mutable reference. The decoder:
///
///   1. Reads a 4-byte size. Below 4 it is the terminator: stop.
///   2. Rejects sizes 4..=7 as malformed.
///   3. Reads the 4-byte signature and `size - 8` payload bytes.
///   4. Classifies the signature and appends the block.
///
/// Unknown signatures are kept as `BlockKind::Unknown` and do not cause
/// errors. The stream is never closed, never rewound, and (by default)
/// not read past the terminator.
///
/// # Example
///
/// ```rust
/// use lnk_decoder::ExtraDataDecoder;
/// use lnk_encoder::ExtraDataEncoder;
/// use lnk_types::BlockKind;
///
/// let bytes = ExtraDataEncoder::new()
///     .add_block(BlockKind::SpecialFolder, &[0x25, 0, 0, 0, 0xDD, 0, 0, 0])
///     .encode()
///     .unwrap();
///
/// let section = ExtraDataDecoder::decode(&mut bytes.as_slice()).unwrap();
/// assert_eq!(section.len(), 1);
/// assert_eq!(section.terminal_block(), Some(0));
/// ```
pub struct ExtraDataDecoder;

impl ExtraDataDecoder {
    /// Decode the region with the default [`DecoderConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`PartialDecode`] carrying the blocks read so far and a
    /// `DecodeError`:
    /// - `Wire(UnexpectedEof)` tagged with the phase (size, signature,
    ///   payload) if the stream ends early.
    /// - `Wire(MalformedSize)` for a declared size of 4..=7.
    /// - `Wire(Io)` for any other reader failure.
    pub fn decode<R: Read>(reader: &mut R) -> Result<ExtraDataSection, PartialDecode> {
        Self::decode_with_config(reader, &DecoderConfig::default())
    }

    /// Decode the region with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Everything [`decode`](Self::decode) returns, plus `BlockTooLarge`
    /// and `TrailingData` when the config enables those checks.
    pub fn decode_with_config<R: Read>(
        reader: &mut R,
        config: &DecoderConfig,
    ) -> Result<ExtraDataSection, PartialDecode> {
        let mut blocks = Vec::new();
        let mut failure = None;
        let mut records = BlockReader::with_config(reader, *config);

        for next in records.by_ref() {
            match next {
                Ok(block) => blocks.push(block),
                Err(source) => {
                    failure = Some(source);
                    break;
                }
            }
        }

        if let Some(source) = failure {
            tracing::warn!(
                blocks = blocks.len(),
                offset = records.bytes_consumed(),
                error = %source,
                "extra data decode failed"
            );
            let partial = ExtraDataSection::from_parts(blocks, records.terminal());
            return Err(PartialDecode::new(partial, source));
        }

        tracing::debug!(
            blocks = blocks.len(),
            bytes = records.bytes_consumed(),
            "decoded extra data section"
        );

        // The reader only stops cleanly after the terminator, so this is `Some`.
        Ok(ExtraDataSection::from_parts(blocks, records.terminal()))
    }

    /// Decode from an in-memory buffer.
    ///
    /// # Returns
    ///
    /// The section and the number of bytes it occupied. Bytes after the
    /// terminator are not examined.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_slice(buf: &[u8]) -> Result<(ExtraDataSection, usize), PartialDecode> {
        let mut rest = buf;
        let section = Self::decode(&mut rest)?;
        Ok((section, buf.len() - rest.len()))
    }
}
