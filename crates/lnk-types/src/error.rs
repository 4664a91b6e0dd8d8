use lnk_wire::WireError;

/// Errors raised by the typed extra-data model.
///
/// These sit above [`WireError`]: they concern names and values of the
/// typed model rather than byte framing. A `TypeError` can wrap a
/// `WireError` when a typed value is turned back into frames.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
  /// A string did not name any known block kind.
  #[error("unknown block kind label: {label:?}")]
  UnknownKindLabel { label: String },

  /// An underlying wire-level error occurred while framing a block.
  #[error(transparent)]
  Wire(#[from] WireError),
}
