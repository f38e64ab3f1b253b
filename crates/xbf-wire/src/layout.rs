// Layout constants for the Xilinx `.bit` header.
//
// Everything multi-byte on the wire is big-endian. The header is a run of
// small records, each either length-prefixed, tag-prefixed, or both:
//
// ┌────────┬──────┬──────────────────────────┬──────────────────┐
// │ Offset │ Size │ Meaning                  │ Constraint       │
// ├────────┼──────┼──────────────────────────┼──────────────────┤
// │ 0      │ 2    │ Field1 length            │ == 9             │
// │ 2      │ 9    │ opaque preamble          │ unchecked        │
// │ 11     │ 2    │ Field2 length            │ == 1             │
// │ 13     │ 1    │ magic                    │ 'a'              │
// │ 14     │ 2    │ Field3 length n3         │ n3 < remaining   │
// │ 16     │ n3   │ NCD name + NUL           │ last byte == 0   │
// │ ...    │ 1    │ magic                    │ 'b'              │
// │ ...    │ 2    │ Field4 length n4         │ n4 < remaining   │
// │ ...    │ n4   │ part name + NUL          │ last byte == 0   │
// │ ...    │ 1    │ magic                    │ 'c'              │
// │ ...    │ 2    │ Field5 length            │ == 11            │
// │ ...    │ 11   │ date + NUL               │ last byte == 0   │
// │ ...    │ 1    │ magic                    │ 'd'              │
// │ ...    │ 2    │ Field6 length            │ == 9             │
// │ ...    │ 9    │ time + NUL               │ last byte == 0   │
// │ ...    │ 1    │ magic                    │ 'e'              │
// │ ...    │ 4    │ payload length u32       │ u32 < remaining  │
// │ ...    │ u32  │ configuration payload    │ opaque           │
// └────────┴──────┴──────────────────────────┴──────────────────┘

/// Required value of the Field1 length prefix.
pub const PREAMBLE_LEN: u16 = 9;

/// Required value of the Field2 length prefix.
pub const MAGIC_A_LEN: u16 = 1;

/// Required value of the Field5 length prefix ("YYYY/MM/DD\0").
pub const DATE_LEN: u16 = 11;

/// Required value of the Field6 length prefix ("HH:MM:SS\0").
pub const TIME_LEN: u16 = 9;

pub const MAGIC_A: u8 = b'a';
pub const MAGIC_B: u8 = b'b';
pub const MAGIC_C: u8 = b'c';
pub const MAGIC_D: u8 = b'd';
pub const MAGIC_E: u8 = b'e';

/// Size of a typical header: the reference layout with a 10-byte design
/// name and a 12-byte part name. Files shorter than this are not worth
/// mapping.
pub const TYPICAL_HEADER_SIZE: usize = 72;

/// Smallest buffer that can hold all seven fields: one-byte (NUL only)
/// design and part names, fixed date/time, and an empty payload.
pub const MIN_HEADER_SIZE: usize = 2 + PREAMBLE_LEN as usize // field 1
    + 2 + MAGIC_A_LEN as usize                                // field 2
    + 2 + 1                                                   // field 3
    + 1 + 2 + 1                                               // field 4
    + 1 + 2 + DATE_LEN as usize                               // field 5
    + 1 + 2 + TIME_LEN as usize                               // field 6
    + 1 + 4; // field 7

/// Byte offset of the Field3 length prefix. Fields 1 and 2 are fixed, so
/// this never moves.
pub const NCD_LEN_OFFSET: usize = 2 + PREAMBLE_LEN as usize + 2 + MAGIC_A_LEN as usize;
