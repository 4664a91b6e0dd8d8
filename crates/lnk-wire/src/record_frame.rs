use std::io::{Read, Write};

use crate::error::{ReadPhase, WireError};

/// Byte length of the size field that starts every record and the terminator.
pub const SIZE_FIELD_LEN: u32 = 4;

/// Byte length of the size + signature header carried by every record.
pub const RECORD_HEADER_LEN: u32 = 8;

/// Size values strictly below this mark the end of the extra-data region.
pub const TERMINAL_LIMIT: u32 = 4;

/// Known record signatures.
///
/// These are the semantic tags that appear on the wire. The `lnk-types`
/// crate maps them to `BlockKind` variants. 0xA000000A is unassigned.
pub mod signature {
    pub const ENVIRONMENT_VARIABLE: u32 = 0xA000_0001;
    pub const CONSOLE: u32 = 0xA000_0002;
    pub const TRACKER: u32 = 0xA000_0003;
    pub const CONSOLE_FE: u32 = 0xA000_0004;
    pub const SPECIAL_FOLDER: u32 = 0xA000_0005;
    pub const DARWIN: u32 = 0xA000_0006;
    pub const ICON_ENVIRONMENT: u32 = 0xA000_0007;
    pub const SHIM: u32 = 0xA000_0008;
    pub const PROPERTY_STORE: u32 = 0xA000_0009;
    pub const KNOWN_FOLDER: u32 = 0xA000_000B;
    pub const VISTA_AND_ABOVE_ID_LIST: u32 = 0xA000_000C;
}

/// What the leading size field of a frame announced.
///
/// The size field is read first; depending on its value it either ends
/// the section or introduces a record whose signature is read right
/// after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameHeader {
    /// A size value below [`TERMINAL_LIMIT`]: end of the extra-data region.
    Terminal(u32),

    /// A record header. `size >= 8` is guaranteed.
    Record { size: u32, signature: u32 },
}

impl FrameHeader {
    /// Number of bytes this header occupied on the wire.
    pub fn wire_len(self) -> u32 {
        match self {
            Self::Terminal(_) => SIZE_FIELD_LEN,
            Self::Record { .. } => RECORD_HEADER_LEN,
        }
    }

    /// Read a frame header starting at `offset`.
    ///
    /// Reads the 4-byte size. Below 4 it is a terminator and nothing more
    /// is read. Between 4 and 7 the record is malformed. Otherwise the
    /// 4-byte signature follows.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] tagged [`ReadPhase::Size`] or
    ///   [`ReadPhase::Signature`] on a short read.
    /// - [`WireError::MalformedSize`] if the size is in `4..8`.
    /// - [`WireError::Io`] for any other reader failure.
    pub fn read_from<R: Read>(r: &mut R, offset: u64) -> Result<Self, WireError> {
        let size = read_u32_le(r, ReadPhase::Size, offset)?;

        if size < TERMINAL_LIMIT {
            return Ok(Self::Terminal(size));
        }

        if size < RECORD_HEADER_LEN {
            return Err(WireError::MalformedSize { size, offset });
        }

        let signature = read_u32_le(
            r,
            ReadPhase::Signature,
            offset + u64::from(SIZE_FIELD_LEN),
        )?;

        Ok(Self::Record { size, signature })
    }
}

/// Record frame, the wire envelope around every extra-data record.
///
/// ```text
/// ┌──────────────────────────────────────────────────┐
/// │ size       (u32 LE, includes these 8 bytes)      │
/// │ signature  (u32 LE)                              │
/// │ payload    [size - 8 bytes]                      │
/// └──────────────────────────────────────────────────┘
/// ```
///
/// The region is `record* terminator`, where the terminator is a lone
/// u32 below 4. There is no count field and no padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordFrame {
    /// Total record length including the 8-byte header.
    pub size: u32,

    /// Semantic tag of the record.
    pub signature: u32,

    /// The raw payload (`size - 8` bytes).
    pub payload: Vec<u8>,
}

impl RecordFrame {
    /// Build a frame around `payload`, computing `size`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::PayloadTooLarge`] if `8 + payload.len()`
    /// overflows a u32.
    pub fn new(signature: u32, payload: Vec<u8>) -> Result<Self, WireError> {
        let size = payload
            .len()
            .checked_add(RECORD_HEADER_LEN as usize)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or(WireError::PayloadTooLarge { len: payload.len() })?;

        Ok(Self {
            size,
            signature,
            payload,
        })
    }

    /// Write this frame to the provided writer.
    ///
    /// Wire layout written:
    ///   1. size as u32 LE
    ///   2. signature as u32 LE
    ///   3. payload bytes
    ///
    /// # Returns
    ///
    /// Total number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`WireError::SizeMismatch`] if `size != 8 + payload.len()`.
    /// - [`WireError::Io`] if the writer fails.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, WireError> {
        if self.size as usize != self.payload.len() + RECORD_HEADER_LEN as usize {
            return Err(WireError::SizeMismatch {
                declared: self.size,
                payload_len: self.payload.len(),
            });
        }

        w.write_all(&self.size.to_le_bytes())?;
        w.write_all(&self.signature.to_le_bytes())?;
        w.write_all(&self.payload)?;

        Ok(self.size as usize)
    }

    /// Read one frame starting at `offset`.
    ///
    /// # Returns
    ///
    /// `Some(frame)` for a record, or `None` with the terminal value
    /// discarded when the terminator is reached. Use
    /// [`FrameHeader::read_from`] directly when the terminal value
    /// matters.
    ///
    /// # Errors
    ///
    /// Everything [`FrameHeader::read_from`] and [`read_payload`] return.
    pub fn read_from<R: Read>(r: &mut R, offset: u64) -> Result<Option<Self>, WireError> {
        match FrameHeader::read_from(r, offset)? {
            FrameHeader::Terminal(_) => Ok(None),
            FrameHeader::Record { size, signature } => {
                let payload = read_payload(
                    r,
                    size - RECORD_HEADER_LEN,
                    offset + u64::from(RECORD_HEADER_LEN),
                )?;
                Ok(Some(Self {
                    size,
                    signature,
                    payload,
                }))
            }
        }
    }
}

/// Read exactly `len` payload bytes starting at `offset`.
///
/// Bytes are pulled through [`Read::take`] so a corrupt, huge `len` only
/// allocates what the stream can actually deliver.
///
/// # Errors
///
/// - [`WireError::UnexpectedEof`] tagged [`ReadPhase::Payload`] if the
///   stream ends first.
/// - [`WireError::Io`] for any other reader failure.
pub fn read_payload<R: Read>(r: &mut R, len: u32, offset: u64) -> Result<Vec<u8>, WireError> {
    let mut payload = Vec::new();
    r.by_ref().take(u64::from(len)).read_to_end(&mut payload)?;

    if payload.len() < len as usize {
        return Err(WireError::UnexpectedEof {
            phase: ReadPhase::Payload,
            offset,
        });
    }

    Ok(payload)
}

/// Write the 4-byte terminator.
///
/// # Errors
///
/// - [`WireError::InvalidTerminal`] if `value >= 4`.
/// - [`WireError::Io`] if the writer fails.
pub fn write_terminal(w: &mut impl Write, value: u32) -> Result<usize, WireError> {
    if value >= TERMINAL_LIMIT {
        return Err(WireError::InvalidTerminal { value });
    }
    w.write_all(&value.to_le_bytes())?;
    Ok(SIZE_FIELD_LEN as usize)
}

fn read_u32_le<R: Read>(r: &mut R, phase: ReadPhase, offset: u64) -> Result<u32, WireError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)
        .map_err(|e| WireError::from_read(e, phase, offset))?;
    Ok(u32::from_le_bytes(buf))
}
