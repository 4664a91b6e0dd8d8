use std::fmt;
use std::str::FromStr;

use lnk_wire::record_frame::signature;

use crate::error::TypeError;

/// Semantic kinds of extra-data blocks.
///
/// Each variant maps to the signature constant mirrored by
/// `lnk_wire::record_frame::signature`. Unknown values are captured by
/// `Unknown(u32)` for forward compatibility: a newer writer may emit
/// block types this version doesn't recognize, and we keep them rather
/// than abort the decode.
///
/// ```text
/// ┌────────────┬───────────────────────┬──────────────────────────────┐
/// │ Signature  │ Variant               │ Label                        │
/// ├────────────┼───────────────────────┼──────────────────────────────┤
/// │ 0xA0000001 │ EnvironmentVariable   │ EnvironmentVariableDataBlock │
/// │ 0xA0000002 │ Console               │ ConsoleDataBlock             │
/// │ 0xA0000003 │ Tracker               │ TrackerDataBlock             │
/// │ 0xA0000004 │ ConsoleFe             │ ConsoleFEDataBlock           │
/// │ 0xA0000005 │ SpecialFolder         │ SpecialFolderDataBlock       │
/// │ 0xA0000006 │ Darwin                │ DarwinDataBlock              │
/// │ 0xA0000007 │ IconEnvironment       │ IconEnvironmentDataBlock     │
/// │ 0xA0000008 │ Shim                  │ ShimDataBlock                │
/// │ 0xA0000009 │ PropertyStore         │ PropertyStoreDataBlock       │
/// │ 0xA000000B │ KnownFolder           │ KnownFolderDataBlock         │
/// │ 0xA000000C │ VistaAndAboveIdList   │ VistaAndAboveIDListDataBlock │
/// └────────────┴───────────────────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    EnvironmentVariable,
    Console,
    Tracker,
    ConsoleFe,
    SpecialFolder,
    Darwin,
    IconEnvironment,
    Shim,
    PropertyStore,
    KnownFolder,
    VistaAndAboveIdList,
    /// Forward-compatible catch-all. The raw signature is preserved so
    /// the block can be reported and re-encoded without loss.
    Unknown(u32),
}

/// Classify a signature. Total: unrecognized values become
/// [`BlockKind::Unknown`].
#[must_use]
pub fn classify(signature: u32) -> BlockKind {
    BlockKind::from_signature(signature)
}

impl BlockKind {
    /// Every named kind, in signature order.
    pub const KNOWN: [Self; 11] = [
        Self::EnvironmentVariable,
        Self::Console,
        Self::Tracker,
        Self::ConsoleFe,
        Self::SpecialFolder,
        Self::Darwin,
        Self::IconEnvironment,
        Self::Shim,
        Self::PropertyStore,
        Self::KnownFolder,
        Self::VistaAndAboveIdList,
    ];

    /// Parse a wire signature into a [`BlockKind`].
    #[must_use]
    pub const fn from_signature(sig: u32) -> Self {
        match sig {
            signature::ENVIRONMENT_VARIABLE => Self::EnvironmentVariable,
            signature::CONSOLE => Self::Console,
            signature::TRACKER => Self::Tracker,
            signature::CONSOLE_FE => Self::ConsoleFe,
            signature::SPECIAL_FOLDER => Self::SpecialFolder,
            signature::DARWIN => Self::Darwin,
            signature::ICON_ENVIRONMENT => Self::IconEnvironment,
            signature::SHIM => Self::Shim,
            signature::PROPERTY_STORE => Self::PropertyStore,
            signature::KNOWN_FOLDER => Self::KnownFolder,
            signature::VISTA_AND_ABOVE_ID_LIST => Self::VistaAndAboveIdList,
            other => Self::Unknown(other),
        }
    }

    /// Return the wire signature for this kind.
    ///
    /// For `Unknown(sig)`, returns the captured value as-is.
    #[must_use]
    pub const fn signature(self) -> u32 {
        match self {
            Self::EnvironmentVariable => signature::ENVIRONMENT_VARIABLE,
            Self::Console => signature::CONSOLE,
            Self::Tracker => signature::TRACKER,
            Self::ConsoleFe => signature::CONSOLE_FE,
            Self::SpecialFolder => signature::SPECIAL_FOLDER,
            Self::Darwin => signature::DARWIN,
            Self::IconEnvironment => signature::ICON_ENVIRONMENT,
            Self::Shim => signature::SHIM,
            Self::PropertyStore => signature::PROPERTY_STORE,
            Self::KnownFolder => signature::KNOWN_FOLDER,
            Self::VistaAndAboveIdList => signature::VISTA_AND_ABOVE_ID_LIST,
            Self::Unknown(sig) => sig,
        }
    }

    /// The data block name, or `None` for unknown signatures.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::EnvironmentVariable => "EnvironmentVariableDataBlock",
            Self::Console => "ConsoleDataBlock",
            Self::Tracker => "TrackerDataBlock",
            Self::ConsoleFe => "ConsoleFEDataBlock",
            Self::SpecialFolder => "SpecialFolderDataBlock",
            Self::Darwin => "DarwinDataBlock",
            Self::IconEnvironment => "IconEnvironmentDataBlock",
            Self::Shim => "ShimDataBlock",
            Self::PropertyStore => "PropertyStoreDataBlock",
            Self::KnownFolder => "KnownFolderDataBlock",
            Self::VistaAndAboveIdList => "VistaAndAboveIDListDataBlock",
            Self::Unknown(_) => return None,
        })
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Look a kind up by its data block name (`"TrackerDataBlock"`).
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::UnknownKindLabel`] if no known kind has that name.
    pub fn from_label(label: &str) -> Result<Self, TypeError> {
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.name() == Some(label))
            .ok_or_else(|| TypeError::UnknownKindLabel {
                label: label.to_string(),
            })
    }
}

impl From<u32> for BlockKind {
    fn from(sig: u32) -> Self {
        Self::from_signature(sig)
    }
}

impl FromStr for BlockKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Signature Not Found - {:#010X}", self.signature()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_known_variants_roundtrip() {
        let table = [
            (BlockKind::EnvironmentVariable, 0xA000_0001),
            (BlockKind::Console, 0xA000_0002),
            (BlockKind::Tracker, 0xA000_0003),
            (BlockKind::ConsoleFe, 0xA000_0004),
            (BlockKind::SpecialFolder, 0xA000_0005),
            (BlockKind::Darwin, 0xA000_0006),
            (BlockKind::IconEnvironment, 0xA000_0007),
            (BlockKind::Shim, 0xA000_0008),
            (BlockKind::PropertyStore, 0xA000_0009),
            (BlockKind::KnownFolder, 0xA000_000B),
            (BlockKind::VistaAndAboveIdList, 0xA000_000C),
        ];

        for (kind, sig) in table {
            assert_eq!(kind.signature(), sig, "signature mismatch for {kind:?}");
            assert_eq!(classify(sig), kind, "classify mismatch for {sig:#010X}");
        }
        assert_eq!(table.map(|(kind, _)| kind), BlockKind::KNOWN);
    }

    #[test]
    fn unknown_value_preserved() {
        let kind = classify(0xDEAD_BEEF);
        assert_eq!(kind, BlockKind::Unknown(0xDEAD_BEEF));
        assert_eq!(kind.signature(), 0xDEAD_BEEF);
        assert!(!kind.is_known());
        assert_eq!(kind.to_string(), "Signature Not Found - 0xDEADBEEF");
    }

    #[test]
    fn gap_in_table_is_unknown() {
        assert_eq!(classify(0xA000_000A), BlockKind::Unknown(0xA000_000A));
        assert_eq!(classify(0), BlockKind::Unknown(0));
    }

    #[test]
    fn display_uses_block_names() {
        assert_eq!(BlockKind::ConsoleFe.to_string(), "ConsoleFEDataBlock");
        assert_eq!(
            BlockKind::VistaAndAboveIdList.to_string(),
            "VistaAndAboveIDListDataBlock"
        );
    }

    #[test]
    fn labels_parse_back() {
        for kind in BlockKind::KNOWN {
            let label = kind.to_string();
            assert_eq!(label.parse::<BlockKind>().unwrap(), kind);
        }
        assert!(matches!(
            "NotADataBlock".parse::<BlockKind>(),
            Err(TypeError::UnknownKindLabel { .. })
        ));
    }
}
