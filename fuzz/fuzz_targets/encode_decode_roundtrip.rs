#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use lnk_decoder::ExtraDataDecoder;
use lnk_encoder::ExtraDataEncoder;
use lnk_types::BlockKind;

#[derive(Debug, Arbitrary)]
struct FuzzBlock {
    signature: u32,
    payload: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    blocks: Vec<FuzzBlock>,
    terminal: u8,
}

// Fuzz target: ExtraDataEncoder -> ExtraDataDecoder roundtrip.
//
// Every region the encoder produces must decode to the same signatures,
// payloads and terminal value, and consume every byte. Classification
// must map each signature back to itself.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = FuzzInput::arbitrary(&mut u) else {
        return;
    };

    let block_count = input.blocks.len().min(32);
    let terminal = u32::from(input.terminal % 4);

    let mut encoder = ExtraDataEncoder::new();
    for block in &input.blocks[..block_count] {
        encoder.add_raw(block.signature, &block.payload);
    }
    encoder.with_terminal(terminal);

    let bytes = encoder.encode().unwrap();
    let (section, consumed) = ExtraDataDecoder::decode_slice(&bytes)
        .unwrap_or_else(|e| panic!("decoder failed on valid encoder output: {e}"));

    assert_eq!(consumed, bytes.len());
    assert_eq!(section.len(), block_count);
    assert_eq!(section.terminal_block(), Some(terminal));
    for (decoded, original) in section.iter().zip(&input.blocks) {
        assert_eq!(decoded.signature(), original.signature);
        assert_eq!(decoded.kind(), BlockKind::from_signature(original.signature));
        assert_eq!(decoded.kind().signature(), original.signature);
        assert_eq!(decoded.data(), original.payload.as_slice());
    }
});
