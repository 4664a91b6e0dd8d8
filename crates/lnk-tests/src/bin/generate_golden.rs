//! Writes the golden fixtures under `tests/golden/<name>/extra.bin`.
//!
//! The fixtures are committed; rerun this only when a fixture is added or
//! deliberately changed, then review the snapshot diffs.
//!
//! ```bash
//! cargo run -p lnk-tests --bin generate_golden
//! ```

use std::fs;

use lnk_encoder::ExtraDataEncoder;
use lnk_tests::golden_dir;
use lnk_types::BlockKind;

/// FOLDERID_System as stored on disk (mixed-endian GUID).
const FOLDERID_SYSTEM: [u8; 16] = [
    0x77, 0x4E, 0xC1, 0x1A, 0xE7, 0x02, 0x5D, 0x4E, 0xB7, 0x44, 0x2E, 0xB1, 0xAE, 0x51, 0x98, 0xB7,
];

const DROID: [u8; 32] = [
    0xB8, 0xA1, 0xF5, 0xC2, 0xE6, 0xD4, 0xA3, 0x4F, 0x9E, 0x4D, 0x1C, 0x7A, 0x2B, 0x3F, 0x0E, 0x11,
    0x5A, 0x3C, 0x9D, 0x0E, 0x7F, 0x1B, 0x11, 0xEF, 0xA8, 0xC4, 0x00, 0x15, 0x5D, 0x3A, 0x2B, 0x01,
];

/// CSIDL_SYSTEM with an ID-list offset of 0xDD.
fn special_folder() -> Vec<u8> {
    let mut payload = 0x25u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&0xDDu32.to_le_bytes());
    payload
}

fn known_folder() -> Vec<u8> {
    let mut payload = FOLDERID_SYSTEM.to_vec();
    payload.extend_from_slice(&0xDDu32.to_le_bytes());
    payload
}

/// Length 0x58, version 0, NetBIOS name, then the volume/object droids
/// and their birth droids.
fn tracker() -> Vec<u8> {
    let mut payload = 0x58u32.to_le_bytes().to_vec();
    payload.extend_from_slice(&0u32.to_le_bytes());
    let mut machine = [0u8; 16];
    machine[..11].copy_from_slice(b"win-desktop");
    payload.extend_from_slice(&machine);
    payload.extend_from_slice(&DROID);
    payload.extend_from_slice(&DROID);
    payload
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let known_blocks = ExtraDataEncoder::new()
        .add_block(BlockKind::SpecialFolder, &special_folder())
        .add_block(BlockKind::KnownFolder, &known_folder())
        .add_block(BlockKind::Tracker, &tracker())
        .encode()?;

    let unknown_signature = ExtraDataEncoder::new()
        .add_raw(0xDEAD_BEEF, b"hello")
        .add_block(BlockKind::SpecialFolder, &special_folder())
        .encode()?;

    // Declares 8 payload bytes, delivers 3.
    let mut truncated_payload = ExtraDataEncoder::new()
        .add_block(BlockKind::EnvironmentVariable, &[0u8; 8])
        .encode()?;
    truncated_payload.truncate(8 + 3);

    let mut trailing_data = ExtraDataEncoder::new()
        .add_block(BlockKind::SpecialFolder, &special_folder())
        .encode()?;
    trailing_data.extend_from_slice(b"junk");

    let fixtures: [(&str, Vec<u8>); 6] = [
        ("terminal_only", ExtraDataEncoder::new().with_terminal(3).encode()?),
        ("known_blocks", known_blocks),
        ("unknown_signature", unknown_signature),
        ("truncated_payload", truncated_payload),
        ("trailing_data", trailing_data),
        ("malformed_size", 5u32.to_le_bytes().to_vec()),
    ];

    for (name, bytes) in fixtures {
        let dir = golden_dir().join(name);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("extra.bin"), &bytes)?;
        println!("{name}: {} bytes", bytes.len());
    }

    Ok(())
}
