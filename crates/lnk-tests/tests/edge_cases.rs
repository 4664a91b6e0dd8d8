//! Edge cases over the golden fixtures.
//!
//! - **Unknown signatures** decode to `BlockKind::Unknown` with the payload
//!   preserved, and decoding carries on past them.
//! - **Truncation and malformed sizes** fail with a phase-tagged error and
//!   hand back the blocks read before the failure.
//! - **Trailing data** after the terminator is ignored by default and
//!   rejected, with a byte count, under the strict policy.

use std::io::Cursor;

use lnk_decoder::{DecodeError, DecoderConfig, ExtraDataDecoder, LnkError, TrailingDataPolicy};
use lnk_tests::{golden, init_tracing};
use lnk_types::BlockKind;
use lnk_wire::{ReadPhase, WireError};

// ── Unknown signature ─────────────────────────────────────────────────────────

#[test]
fn unknown_signature_preserved() {
    init_tracing();
    let bytes = golden("unknown_signature");
    let section = ExtraDataDecoder::decode(&mut bytes.as_slice())
        .expect("unknown signatures must not fail the decode");

    assert_eq!(section.len(), 2);
    let unknown = &section.blocks()[0];
    assert_eq!(unknown.kind(), BlockKind::Unknown(0xDEAD_BEEF));
    assert_eq!(unknown.signature(), 0xDEAD_BEEF);
    assert_eq!(unknown.data(), b"hello");
    assert_eq!(section.blocks()[1].kind(), BlockKind::SpecialFolder);
}

// ── Terminal only ─────────────────────────────────────────────────────────────

#[test]
fn terminal_only_yields_no_blocks() {
    let bytes = golden("terminal_only");
    assert_eq!(bytes, hex::decode("03000000").unwrap());

    let section = ExtraDataDecoder::decode(&mut bytes.as_slice()).unwrap();
    assert!(section.is_empty());
    assert_eq!(section.terminal_block(), Some(3));
}

// ── Truncation ────────────────────────────────────────────────────────────────

#[test]
fn truncated_payload_reports_payload_phase() {
    init_tracing();
    let bytes = golden("truncated_payload");
    let partial = ExtraDataDecoder::decode(&mut bytes.as_slice())
        .expect_err("a short payload must fail");

    assert_eq!(partial.error().phase(), Some(ReadPhase::Payload));
    assert!(
        partial.section().is_empty(),
        "the truncated block must not be added, got {:?}",
        partial.section().blocks()
    );
    assert!(partial.error().to_string().contains("reading payload"));
}

#[test]
fn every_truncation_point_fails_cleanly() {
    let full = golden("known_blocks");
    // Block boundaries: 0, 16, 44, 140; terminator at 140..144.
    for cut in 0..full.len() {
        let partial = ExtraDataDecoder::decode(&mut &full[..cut])
            .expect_err("every strict prefix is truncated");

        let expected_blocks = match cut {
            0..16 => 0,
            16..44 => 1,
            44..140 => 2,
            _ => 3,
        };
        assert_eq!(partial.section().len(), expected_blocks, "cut at {cut}");

        let expected_phase = match cut {
            0..4 | 16..20 | 44..48 | 140.. => ReadPhase::Size,
            4..8 | 20..24 | 48..52 => ReadPhase::Signature,
            _ => ReadPhase::Payload,
        };
        assert_eq!(partial.error().phase(), Some(expected_phase), "cut at {cut}");
    }
}

// ── Malformed size ────────────────────────────────────────────────────────────

#[test]
fn malformed_size_rejected() {
    let bytes = golden("malformed_size");
    let partial = ExtraDataDecoder::decode(&mut bytes.as_slice()).unwrap_err();

    assert!(matches!(
        partial.error(),
        DecodeError::Wire(WireError::MalformedSize { size: 5, offset: 0 })
    ));
    assert!(partial.section().is_empty());
}

#[test]
fn loader_wraps_with_section_context() {
    let bytes = golden("malformed_size");
    let result: Result<_, LnkError> =
        ExtraDataDecoder::decode(&mut bytes.as_slice()).map_err(LnkError::from);

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("extra-data section: "));
    assert!(err.partial_extra_data().is_some());
}

// ── Trailing data ─────────────────────────────────────────────────────────────

#[test]
fn trailing_data_left_unread_by_default() {
    let bytes = golden("trailing_data");
    let mut cursor = Cursor::new(&bytes);
    let section = ExtraDataDecoder::decode(&mut cursor).unwrap();

    assert_eq!(section.len(), 1);
    assert_eq!(cursor.position(), 20);
    assert_eq!(&bytes[20..], b"junk");
}

#[test]
fn trailing_data_rejected_when_strict() {
    let bytes = golden("trailing_data");
    let config = DecoderConfig {
        trailing_data: TrailingDataPolicy::Reject,
        ..DecoderConfig::default()
    };
    let partial =
        ExtraDataDecoder::decode_with_config(&mut bytes.as_slice(), &config).unwrap_err();

    assert!(matches!(
        partial.error(),
        DecodeError::TrailingData { extra_bytes: 4 }
    ));
    assert_eq!(partial.section().len(), 1);
    assert_eq!(partial.section().terminal_block(), Some(0));
}

// ── Size limit ────────────────────────────────────────────────────────────────

#[test]
fn size_limit_stops_at_oversized_block() {
    let bytes = golden("known_blocks");
    let config = DecoderConfig {
        max_block_size: Some(64),
        ..DecoderConfig::default()
    };
    let partial =
        ExtraDataDecoder::decode_with_config(&mut bytes.as_slice(), &config).unwrap_err();

    // The 96-byte tracker block trips the limit; the two before it survive.
    assert!(matches!(
        partial.error(),
        DecodeError::BlockTooLarge {
            size: 96,
            limit: 64,
            offset: 44
        }
    ));
    assert_eq!(partial.section().len(), 2);
}
