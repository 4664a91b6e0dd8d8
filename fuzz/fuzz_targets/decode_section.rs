#![no_main]

use libfuzzer_sys::fuzz_target;
use lnk_decoder::ExtraDataDecoder;

// Fuzz target: ExtraDataDecoder over arbitrary bytes.
//
// Catches bugs in:
// - Sizes in the 4..8 gap
// - Huge declared sizes with short payloads
// - Truncation inside any of the three fields
//
// Whatever happens, the decoder must never claim more bytes than it was
// given, and a clean decode must re-encode to exactly the consumed prefix.
fuzz_target!(|data: &[u8]| {
    match ExtraDataDecoder::decode_slice(data) {
        Ok((section, consumed)) => {
            assert!(consumed <= data.len());
            let mut out = Vec::new();
            section.write_to(&mut out).unwrap();
            assert_eq!(out, &data[..consumed]);
        }
        Err(partial) => {
            assert!(partial.section().encoded_len() <= data.len() as u64);
        }
    }
});
