#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xbf_decoder::decode;
use xbf_fixtures::SyntheticHeader;

#[derive(Arbitrary, Debug)]
struct Input {
    ncd_name: Vec<u8>,
    part_name: Vec<u8>,
    date: [u8; 10],
    time: [u8; 8],
    payload: Vec<u8>,
}

// Fuzz target: SyntheticHeader -> bytes -> decode roundtrip.
//
// Builds a well-formed header from the input (NULs inside the strings are
// replaced so the terminator stays last) and asserts every field decodes
// back unchanged.
fuzz_target!(|input: Input| {
    let clean = |s: &[u8]| -> Vec<u8> { s.iter().map(|&b| b.max(1)).collect() };
    let ncd = clean(&input.ncd_name);
    let part = clean(&input.part_name);
    let date = clean(&input.date);
    let time = clean(&input.time);
    if ncd.len() >= usize::from(u16::MAX) || part.len() >= usize::from(u16::MAX) {
        return;
    }

    let header = SyntheticHeader::with_strings(&ncd, &part, &date, &time)
        .with_payload(input.payload.clone());
    let bytes = header.to_bytes();

    let parsed = decode(&bytes).unwrap();
    assert_eq!(parsed.ncd_name().as_bytes(), &ncd[..]);
    assert_eq!(parsed.part_name().as_bytes(), &part[..]);
    assert_eq!(parsed.date().as_bytes(), &date[..]);
    assert_eq!(parsed.time().as_bytes(), &time[..]);
    assert_eq!(parsed.payload(), &input.payload[..]);
});
