//! Property tests: the decoder never panics, never reads out of bounds,
//! and recovers whatever a well-formed header was built from.

use proptest::prelude::*;
use xbf_decoder::decode;
use xbf_fixtures::SyntheticHeader;

/// Header strings: any bytes except NUL, short enough for a `u16` prefix.
fn name() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(1u8..=255, 0..64)
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        if let Ok(header) = decode(&bytes) {
            let end = header.payload_offset() + header.payload().len();
            prop_assert!(end <= bytes.len());
        }
    }

    #[test]
    fn well_formed_headers_decode_to_their_fields(
        ncd in name(),
        part in name(),
        date in proptest::collection::vec(1u8..=255, 10),
        time in proptest::collection::vec(1u8..=255, 8),
        payload in proptest::collection::vec(any::<u8>(), 0..128),
        trailing in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let header = SyntheticHeader::with_strings(&ncd, &part, &date, &time)
            .with_payload(payload.clone());
        let mut bytes = header.to_bytes();
        bytes.extend_from_slice(&trailing);

        let parsed = decode(&bytes).unwrap();
        prop_assert_eq!(parsed.ncd_name().as_bytes(), &ncd[..]);
        prop_assert_eq!(parsed.part_name().as_bytes(), &part[..]);
        prop_assert_eq!(parsed.date().as_bytes(), &date[..]);
        prop_assert_eq!(parsed.time().as_bytes(), &time[..]);
        prop_assert_eq!(parsed.payload(), &payload[..]);
        prop_assert_eq!(parsed.payload_offset(), header.payload_len_offset() + 4);
    }

    #[test]
    fn single_byte_corruption_never_panics(
        index in 0usize..72,
        value in any::<u8>(),
    ) {
        let mut bytes = SyntheticHeader::with_strings(
            b"xform.ncd", b"v1000efg860", b"2001/08/10", b"06:55:04",
        )
        .with_payload(vec![0xff; 8])
        .to_bytes();
        bytes[index] = value;

        match decode(&bytes) {
            Ok(header) => {
                prop_assert!(header.payload_offset() <= bytes.len());
            }
            Err(err) => {
                if let Some(offset) = err.offset() {
                    prop_assert!(offset <= bytes.len());
                }
            }
        }
    }
}
