use xbf_wire::layout::{DATE_LEN, MAGIC_A, MAGIC_A_LEN, MAGIC_B, MAGIC_C, MAGIC_D, MAGIC_E, PREAMBLE_LEN, TIME_LEN};

/// Preamble bytes found in headers written by the Xilinx tools.
pub const REFERENCE_PREAMBLE: [u8; 9] = [0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x00];

/// Payload length of the reference header.
pub const REFERENCE_PAYLOAD_LEN: u32 = 0x000c_9090;

/// A header described field by field, for producing test inputs.
///
/// Unlike a real encoder this never computes anything on its own: every
/// length prefix and tag byte is stored as-is, so a test can put any value
/// in any slot. String fields are written verbatim; include the `\0`
/// yourself (or don't, to exercise the terminator check).
///
/// ```text
/// field1_len preamble field2_len magic_a
/// ncd_len ncd_name
/// magic_b part_len part_name
/// magic_c date_len date
/// magic_d time_len time
/// magic_e payload_len payload
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticHeader {
    pub field1_len: u16,
    pub preamble: Vec<u8>,
    pub field2_len: u16,
    pub magic_a: u8,
    pub ncd_len: u16,
    pub ncd_name: Vec<u8>,
    pub magic_b: u8,
    pub part_len: u16,
    pub part_name: Vec<u8>,
    pub magic_c: u8,
    pub date_len: u16,
    pub date: Vec<u8>,
    pub magic_d: u8,
    pub time_len: u16,
    pub time: Vec<u8>,
    pub magic_e: u8,
    pub payload_len: u32,
    pub payload: Vec<u8>,
}

impl SyntheticHeader {
    /// The worked example from the `.bit` format FAQ, with its payload
    /// filled with `0xff`.
    #[must_use]
    pub fn reference() -> Self {
        let payload_len = usize::try_from(REFERENCE_PAYLOAD_LEN).unwrap_or(usize::MAX);
        Self::with_strings(b"xform.ncd", b"v1000efg860", b"2001/08/10", b"06:55:04")
            .with_payload(vec![0xff; payload_len])
    }

    /// A well-formed header for the given string fields (terminators are
    /// appended, lengths computed) and an empty payload.
    ///
    /// # Panics
    ///
    /// Panics if a name is longer than a `u16` length prefix can describe.
    #[must_use]
    pub fn with_strings(ncd_name: &[u8], part_name: &[u8], date: &[u8], time: &[u8]) -> Self {
        let nul = |s: &[u8]| {
            let mut v = s.to_vec();
            v.push(0);
            v
        };
        let len = |s: &[u8]| u16::try_from(s.len() + 1).expect("name fits a u16 length prefix");
        Self {
            field1_len: PREAMBLE_LEN,
            preamble: REFERENCE_PREAMBLE.to_vec(),
            field2_len: MAGIC_A_LEN,
            magic_a: MAGIC_A,
            ncd_len: len(ncd_name),
            ncd_name: nul(ncd_name),
            magic_b: MAGIC_B,
            part_len: len(part_name),
            part_name: nul(part_name),
            magic_c: MAGIC_C,
            date_len: DATE_LEN,
            date: nul(date),
            magic_d: MAGIC_D,
            time_len: TIME_LEN,
            time: nul(time),
            magic_e: MAGIC_E,
            payload_len: 0,
            payload: Vec::new(),
        }
    }

    /// Replace the payload and set the declared length to match.
    ///
    /// # Panics
    ///
    /// Panics if the payload is longer than `u32::MAX`.
    #[must_use]
    pub fn with_payload(mut self, payload: Vec<u8>) -> Self {
        self.payload_len = u32::try_from(payload.len()).expect("payload fits a u32 length prefix");
        self.payload = payload;
        self
    }

    /// Serialize in wire order, big-endian.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            64 + self.ncd_name.len() + self.part_name.len() + self.payload.len(),
        );

        out.extend_from_slice(&self.field1_len.to_be_bytes());
        out.extend_from_slice(&self.preamble);

        out.extend_from_slice(&self.field2_len.to_be_bytes());
        out.push(self.magic_a);

        out.extend_from_slice(&self.ncd_len.to_be_bytes());
        out.extend_from_slice(&self.ncd_name);

        out.push(self.magic_b);
        out.extend_from_slice(&self.part_len.to_be_bytes());
        out.extend_from_slice(&self.part_name);

        out.push(self.magic_c);
        out.extend_from_slice(&self.date_len.to_be_bytes());
        out.extend_from_slice(&self.date);

        out.push(self.magic_d);
        out.extend_from_slice(&self.time_len.to_be_bytes());
        out.extend_from_slice(&self.time);

        out.push(self.magic_e);
        out.extend_from_slice(&self.payload_len.to_be_bytes());
        out.extend_from_slice(&self.payload);

        out
    }

    /// Byte offset of the Field7 length prefix in [`to_bytes`](Self::to_bytes)
    /// output.
    #[must_use]
    pub fn payload_len_offset(&self) -> usize {
        2 + self.preamble.len()
            + 2 + 1
            + 2 + self.ncd_name.len()
            + 1 + 2 + self.part_name.len()
            + 1 + 2 + self.date.len()
            + 1 + 2 + self.time.len()
            + 1
    }
}

impl Default for SyntheticHeader {
    /// An all-zero header: every length, tag and string empty or zero.
    /// Mirrors a zero-initialized packed struct; fill in only what a test needs.
    fn default() -> Self {
        Self {
            field1_len: 0,
            preamble: vec![0; 9],
            field2_len: 0,
            magic_a: 0,
            ncd_len: 0,
            ncd_name: vec![0; 10],
            magic_b: 0,
            part_len: 0,
            part_name: vec![0; 12],
            magic_c: 0,
            date_len: 0,
            date: vec![0; 11],
            magic_d: 0,
            time_len: 0,
            time: vec![0; 9],
            magic_e: 0,
            payload_len: 0,
            payload: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_header_is_typical_size() {
        let header = SyntheticHeader::with_strings(b"xform.ncd", b"v1000efg860", b"2001/08/10", b"06:55:04");
        assert_eq!(header.to_bytes().len(), 72);
        assert_eq!(header.payload_len_offset(), 68);
    }

    #[test]
    fn default_matches_zeroed_struct_size() {
        assert_eq!(SyntheticHeader::default().to_bytes().len(), 72);
    }

    #[test]
    fn lengths_are_big_endian() {
        let bytes = SyntheticHeader::reference().to_bytes();
        assert_eq!(&bytes[0..2], &[0x00, 0x09]);
        assert_eq!(&bytes[68..72], &[0x00, 0x0c, 0x90, 0x90]);
    }
}
