#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: RecordFrame::read_from on a single record.
fuzz_target!(|data: &[u8]| {
    let mut input = data;
    let _ = lnk_wire::record_frame::RecordFrame::read_from(&mut input, 0);
});
