/// Configuration for the extra-data decoder.
///
/// ```text
/// ┌────────────────┬────────────────────────────────────────────────────┐
/// │ Field          │ Purpose                                            │
/// ├────────────────┼────────────────────────────────────────────────────┤
/// │ trailing_data  │ What to do with bytes after the terminator         │
/// │ max_block_size │ Optional upper bound on a single record's size     │
/// └────────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Policy for bytes that follow the terminator.
    pub trailing_data: TrailingDataPolicy,

    /// When set, a record whose declared size exceeds this limit fails
    /// with `DecodeError::BlockTooLarge` before its payload is read.
    pub max_block_size: Option<u32>,
}

impl Default for DecoderConfig {
    /// Lenient defaults: trailing bytes are left in the stream untouched
    /// and record sizes are bounded only by the u32 size field.
    fn default() -> Self {
        Self {
            trailing_data: TrailingDataPolicy::Ignore,
            max_block_size: None,
        }
    }
}

impl DecoderConfig {
    /// Reject trailing bytes and records larger than `max_block_size`.
    #[must_use]
    pub fn strict(max_block_size: u32) -> Self {
        Self {
            trailing_data: TrailingDataPolicy::Reject,
            max_block_size: Some(max_block_size),
        }
    }
}

/// What happens to the stream after the terminator is read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrailingDataPolicy {
    /// Stop right after the terminator. Anything that follows stays
    /// unread for the caller.
    #[default]
    Ignore,

    /// Drain the rest of the stream and fail with
    /// `DecodeError::TrailingData` if it was not empty. The terminal value
    /// is still reported on the partial section.
    Reject,
}
