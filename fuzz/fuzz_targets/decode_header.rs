#![no_main]

use libfuzzer_sys::fuzz_target;
use xbf_decoder::{DecoderConfig, HeaderDecoder};

// Fuzz target: HeaderDecoder::decode on arbitrary bytes.
//
// Catches bugs in:
// - Length prefixes pointing past the end of the buffer
// - Zero-length strings
// - Payload lengths near u32::MAX
// - Error rendering with diagnostics on
fuzz_target!(|data: &[u8]| {
    let decoder = HeaderDecoder::new(DecoderConfig::default().with_diagnostics(true));
    match decoder.decode(data) {
        Ok(header) => {
            assert!(header.payload_offset() + header.payload().len() <= data.len());
            let _ = header.to_string();
        }
        Err(e) => {
            let _ = decoder.render(&e);
        }
    }
});
