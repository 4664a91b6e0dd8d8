#![no_main]

use libfuzzer_sys::fuzz_target;
use lnk_wire::record_frame::RecordFrame;

// Fuzz target: RecordFrame write->read roundtrip.
//
// Input format:
//   bytes 0..4: signature (little-endian)
//   bytes 4..:  payload
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let signature = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let frame = RecordFrame::new(signature, data[4..].to_vec()).unwrap();

    let mut wire = Vec::new();
    let written = frame.write_to(&mut wire).unwrap();
    assert_eq!(written, wire.len());

    let mut input = wire.as_slice();
    let parsed = RecordFrame::read_from(&mut input, 0).unwrap().unwrap();
    assert_eq!(parsed, frame);
    assert!(input.is_empty());
});
