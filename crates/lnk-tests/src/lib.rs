//! Shared helpers for the integration tests, benches and the golden
//! fixture generator.

use std::path::{Path, PathBuf};

use lnk_encoder::ExtraDataEncoder;
use lnk_types::BlockKind;

/// Directory holding `tests/golden/<fixture>/extra.bin`.
#[must_use]
pub fn golden_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/golden")
}

/// Read a golden fixture's `extra.bin`.
///
/// # Panics
///
/// Panics if the fixture is missing; run `generate_golden` to create it.
#[must_use]
pub fn golden(fixture: &str) -> Vec<u8> {
    let path = golden_dir().join(fixture).join("extra.bin");
    std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", path.display()))
}

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `lnk_decoder=debug`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lnk_decoder=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// A synthetic region with `count` blocks cycling through every known
/// kind plus one unknown signature, payload lengths 0..64.
#[must_use]
pub fn synthetic_encoder(count: usize) -> ExtraDataEncoder {
    let mut encoder = ExtraDataEncoder::new();
    let kinds: Vec<BlockKind> = BlockKind::KNOWN
        .into_iter()
        .chain([BlockKind::Unknown(0xDEAD_BEEF)])
        .collect();

    for i in 0..count {
        let kind = kinds[i % kinds.len()];
        #[allow(clippy::cast_possible_truncation)]
        let payload: Vec<u8> = (0..i % 64).map(|b| b as u8).collect();
        encoder.add_block(kind, &payload);
    }
    encoder
}
