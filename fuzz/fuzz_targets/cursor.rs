#![no_main]

use libfuzzer_sys::fuzz_target;
use xbf_wire::Cursor;

// Fuzz target: Cursor reads driven by the input itself.
//
// Each input byte picks the next read (u8, u16, u32 or a take of up to 63
// bytes). A failed read must leave the position unchanged.
fuzz_target!(|data: &[u8]| {
    let mut cur = Cursor::new(data);
    for &op in data {
        let before = cur.position();
        let ok = match op & 0b11 {
            0 => cur.read_u8().is_ok(),
            1 => cur.read_u16_be().is_ok(),
            2 => cur.read_u32_be().is_ok(),
            _ => cur.take(usize::from(op >> 2)).is_ok(),
        };
        if !ok {
            assert_eq!(cur.position(), before);
        }
        assert!(cur.position() <= data.len());
    }
});
