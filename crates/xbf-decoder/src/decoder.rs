use std::fmt;
use std::ops::Range;

use tracing::{debug, trace};
use xbf_wire::layout::{
    DATE_LEN, MAGIC_A, MAGIC_A_LEN, MAGIC_B, MAGIC_C, MAGIC_D, MAGIC_E, MIN_HEADER_SIZE,
    PREAMBLE_LEN, TIME_LEN,
};
use xbf_wire::{Cursor, Field, WireError};

use crate::config::DecoderConfig;
use crate::error::{DecodeError, Located};
use crate::header::{HeaderLayout, ParsedHeader};
use crate::text::HeaderText;

/// Decoder for the `.bit` header.
///
/// Stateless apart from its [`DecoderConfig`]: it is `Copy`, holds no
/// buffers, and the same instance can decode on any number of threads at
/// once.
///
/// Decoding is a single forward pass over the seven fields:
///
///   1. **Field 1**: length must be 9; the 9 bytes are kept but not checked.
///   2. **Field 2**: length must be 1; the byte must be `a`.
///   3. **Field 3**: length `n < remaining`; NUL at `n-1`; NCD name.
///   4. **Field 4**: tag `b`; same rules as field 3; part name.
///   5. **Field 5**: tag `c`; length must be 11; NUL-terminated date.
///   6. **Field 6**: tag `d`; length must be 9; NUL-terminated time.
///   7. **Field 7**: tag `e`; u32 length `< remaining`; payload follows.
///
/// "Remaining" is counted from the start of the length prefix being checked.
/// The first failure ends the walk.
///
/// # Example
///
/// ```rust
/// use xbf_decoder::HeaderDecoder;
///
/// let mut bit = Vec::new();
/// bit.extend_from_slice(&[0x00, 0x09]);
/// bit.extend_from_slice(&[0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x00]);
/// bit.extend_from_slice(&[0x00, 0x01, b'a']);
/// bit.extend_from_slice(&[0x00, 0x0a]);
/// bit.extend_from_slice(b"xform.ncd\0");
/// bit.extend_from_slice(&[b'b', 0x00, 0x0c]);
/// bit.extend_from_slice(b"v1000efg860\0");
/// bit.extend_from_slice(&[b'c', 0x00, 0x0b]);
/// bit.extend_from_slice(b"2001/08/10\0");
/// bit.extend_from_slice(&[b'd', 0x00, 0x09]);
/// bit.extend_from_slice(b"06:55:04\0");
/// bit.extend_from_slice(&[b'e', 0x00, 0x00, 0x00, 0x04]);
/// bit.extend_from_slice(&[0xff, 0xff, 0xff, 0xff]);
///
/// let header = HeaderDecoder::default().decode(&bit).unwrap();
/// assert_eq!(header.ncd_name(), "xform.ncd");
/// assert_eq!(header.part_name(), "v1000efg860");
/// assert_eq!(header.payload_offset(), 72);
/// assert_eq!(header.payload(), &[0xff; 4]);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderDecoder {
    config: DecoderConfig,
}

impl HeaderDecoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode the header at the start of `buf`.
    ///
    /// `buf` may be (and usually is) longer than the header; the payload
    /// that follows is sliced, never read.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::BufferTooShort`] if `buf` can't hold a minimal header.
    /// - [`DecodeError::FormatError`] if a fixed length prefix is wrong.
    /// - [`DecodeError::MagicMismatch`] if a tag byte is wrong.
    /// - [`DecodeError::LengthOverflow`] if a declared length runs past the end.
    /// - [`DecodeError::UnterminatedString`] if a string lacks its NUL.
    /// - [`DecodeError::Truncated`] if a fixed-size read hits the end.
    pub fn decode<'a>(&self, buf: &'a [u8]) -> Result<ParsedHeader<'a>, DecodeError> {
        if buf.len() < MIN_HEADER_SIZE {
            return Err(DecodeError::BufferTooShort {
                len: buf.len(),
                min: MIN_HEADER_SIZE,
            });
        }

        let mut walk = Walk {
            cur: Cursor::new(buf),
        };

        // Field 1
        walk.fixed_len(Field::Preamble, PREAMBLE_LEN)?;
        let preamble = walk.span(Field::Preamble, usize::from(PREAMBLE_LEN))?;

        // Field 2
        walk.fixed_len(Field::MagicA, MAGIC_A_LEN)?;
        walk.magic(Field::MagicA, MAGIC_A)?;

        // Field 3
        let n = walk.bounded_u16(Field::NcdName)?;
        let ncd_name = walk.terminated(Field::NcdName, n)?;

        // Field 4
        walk.magic(Field::PartName, MAGIC_B)?;
        let n = walk.bounded_u16(Field::PartName)?;
        let part_name = walk.terminated(Field::PartName, n)?;

        // Field 5
        walk.magic(Field::Date, MAGIC_C)?;
        walk.fixed_len(Field::Date, DATE_LEN)?;
        let date = walk.terminated(Field::Date, usize::from(DATE_LEN))?;

        // Field 6
        walk.magic(Field::Time, MAGIC_D)?;
        walk.fixed_len(Field::Time, TIME_LEN)?;
        let time = walk.terminated(Field::Time, usize::from(TIME_LEN))?;

        // Field 7
        walk.magic(Field::Payload, MAGIC_E)?;
        let (payload_offset, payload_length) = walk.payload()?;

        let layout = HeaderLayout {
            preamble,
            ncd_name,
            part_name,
            date,
            time,
            payload_offset,
            payload_length,
        };

        // Every range was produced by a successful cursor read over `buf`.
        let header = ParsedHeader {
            preamble: &buf[layout.preamble.clone()],
            ncd_name: HeaderText::new(&buf[layout.ncd_name.clone()]),
            part_name: HeaderText::new(&buf[layout.part_name.clone()]),
            date: HeaderText::new(&buf[layout.date.clone()]),
            time: HeaderText::new(&buf[layout.time.clone()]),
            payload: &buf[layout.payload_range()],
            layout,
        };

        debug!(
            ncd_name = %header.ncd_name,
            part_name = %header.part_name,
            payload_offset,
            payload_length,
            "decoded bitstream header"
        );

        Ok(header)
    }

    /// Render an error for display, honouring `include_diagnostics`.
    ///
    /// With diagnostics on, positioned errors get a `[FieldN at offset 0x..]`
    /// suffix.
    pub fn render<E>(&self, err: &E) -> String
    where
        E: Located + fmt::Display + ?Sized,
    {
        match err.location() {
            Some((field, offset)) if self.config.include_diagnostics => {
                format!("{err} [{field} at offset {offset:#06x}]")
            }
            _ => err.to_string(),
        }
    }
}

/// Decode with the default configuration.
///
/// # Errors
///
/// See [`HeaderDecoder::decode`].
pub fn decode(buf: &[u8]) -> Result<ParsedHeader<'_>, DecodeError> {
    HeaderDecoder::default().decode(buf)
}

/// One decode pass. Each step consumes bytes or fails.
struct Walk<'a> {
    cur: Cursor<'a>,
}

impl Walk<'_> {
    fn truncated(field: Field) -> impl FnOnce(WireError) -> DecodeError {
        move |source| DecodeError::Truncated { field, source }
    }

    /// Length prefix that must equal `expected`.
    fn fixed_len(&mut self, field: Field, expected: u16) -> Result<(), DecodeError> {
        let offset = self.cur.position();
        let found = self.cur.read_u16_be().map_err(Self::truncated(field))?;
        trace!(%field, offset, found, "length prefix");
        if found != expected {
            return Err(DecodeError::FormatError {
                field,
                expected,
                found,
                offset,
            });
        }
        Ok(())
    }

    fn magic(&mut self, field: Field, expected: u8) -> Result<(), DecodeError> {
        let offset = self.cur.position();
        let found = self.cur.read_u8().map_err(Self::truncated(field))?;
        if found != expected {
            return Err(DecodeError::MagicMismatch {
                field,
                expected: char::from(expected),
                found,
                offset,
            });
        }
        Ok(())
    }

    /// Variable length prefix: `n` must be strictly below the bytes left
    /// counted from the prefix itself, and must fit after it.
    fn bounded_u16(&mut self, field: Field) -> Result<usize, DecodeError> {
        let offset = self.cur.position();
        let remaining = self.cur.remaining();
        let n = usize::from(self.cur.read_u16_be().map_err(Self::truncated(field))?);
        trace!(%field, offset, n, remaining, "length prefix");
        if n >= remaining || n > self.cur.remaining() {
            return Err(DecodeError::LengthOverflow {
                field,
                declared: u32::try_from(n).unwrap_or(u32::MAX),
                remaining,
                offset,
            });
        }
        Ok(n)
    }

    fn span(&mut self, field: Field, n: usize) -> Result<Range<usize>, DecodeError> {
        let start = self.cur.position();
        self.cur.skip(n).map_err(Self::truncated(field))?;
        Ok(start..start + n)
    }

    /// `n` bytes whose last one must be NUL. Returns the range without it.
    fn terminated(&mut self, field: Field, n: usize) -> Result<Range<usize>, DecodeError> {
        let start = self.cur.position();
        let bytes = self.cur.take(n).map_err(Self::truncated(field))?;
        match bytes.last() {
            Some(0) => Ok(start..start + n - 1),
            _ => Err(DecodeError::UnterminatedString {
                field,
                offset: start + n.saturating_sub(1),
            }),
        }
    }

    /// Field 7's u32 length. The payload itself is only bounds-checked.
    fn payload(&mut self) -> Result<(usize, u32), DecodeError> {
        let field = Field::Payload;
        let offset = self.cur.position();
        let remaining = self.cur.remaining();
        let declared = self.cur.read_u32_be().map_err(Self::truncated(field))?;
        trace!(%field, offset, declared, remaining, "payload length");

        let overflow = DecodeError::LengthOverflow {
            field,
            declared,
            remaining,
            offset,
        };
        let len = usize::try_from(declared).map_err(|_| overflow.clone())?;
        if len >= remaining {
            return Err(overflow);
        }
        let payload_offset = self.cur.position();
        self.cur.peek(len).map_err(|_| overflow)?;
        Ok((payload_offset, declared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The reference header from the `.bit` FAQ, with `payload_len` bytes
    /// of payload attached.
    fn reference(declared: u32, payload_len: usize) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&9u16.to_be_bytes());
        v.extend_from_slice(&[0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x0f, 0xf0, 0x00]);
        v.extend_from_slice(&1u16.to_be_bytes());
        v.push(b'a');
        v.extend_from_slice(&10u16.to_be_bytes());
        v.extend_from_slice(b"xform.ncd\0");
        v.push(b'b');
        v.extend_from_slice(&12u16.to_be_bytes());
        v.extend_from_slice(b"v1000efg860\0");
        v.push(b'c');
        v.extend_from_slice(&11u16.to_be_bytes());
        v.extend_from_slice(b"2001/08/10\0");
        v.push(b'd');
        v.extend_from_slice(&9u16.to_be_bytes());
        v.extend_from_slice(b"06:55:04\0");
        v.push(b'e');
        v.extend_from_slice(&declared.to_be_bytes());
        v.resize(v.len() + payload_len, 0xaa);
        v
    }

    #[test]
    fn decodes_reference_header() {
        let buf = reference(16, 16);
        let h = decode(&buf).unwrap();
        assert_eq!(h.ncd_name(), "xform.ncd");
        assert_eq!(h.part_name(), "v1000efg860");
        assert_eq!(h.date(), "2001/08/10");
        assert_eq!(h.time(), "06:55:04");
        assert_eq!(h.payload_offset(), 72);
        assert_eq!(h.payload_length(), 16);
        assert_eq!(h.payload().len(), 16);
    }

    #[test]
    fn payload_flush_with_end_is_accepted() {
        let buf = reference(3, 3);
        let h = decode(&buf).unwrap();
        assert_eq!(h.payload(), &[0xaa; 3]);
    }

    #[test]
    fn payload_past_end_is_rejected() {
        // 4 + 2 bytes remain at the length prefix, so 5 passes the strict
        // less-than check but still doesn't fit.
        let buf = reference(5, 2);
        assert!(matches!(
            decode(&buf),
            Err(DecodeError::LengthOverflow {
                field: Field::Payload,
                declared: 5,
                remaining: 6,
                offset: 68,
            })
        ));
    }

    #[test]
    fn payload_equal_to_remaining_is_rejected() {
        let buf = reference(6, 2);
        assert!(matches!(
            decode(&buf),
            Err(DecodeError::LengthOverflow { declared: 6, remaining: 6, .. })
        ));
    }

    #[test]
    fn zero_length_name_is_unterminated() {
        let mut buf = reference(0, 0);
        // A zero-length name leaves no room for the terminator.
        buf[14..16].copy_from_slice(&0u16.to_be_bytes());
        assert!(matches!(
            decode(&buf),
            Err(DecodeError::UnterminatedString { field: Field::NcdName, offset: 16 })
        ));
    }

    #[test]
    fn render_without_diagnostics() {
        let mut buf = reference(0, 0);
        buf[1] = 8;
        let err = decode(&buf).unwrap_err();
        let plain = HeaderDecoder::default().render(&err);
        assert_eq!(plain, "wrong header format: Field1's length should be 9, but is 8");
    }

    #[test]
    fn render_with_diagnostics() {
        let mut buf = reference(0, 0);
        buf[26] = b'x';
        let decoder = HeaderDecoder::new(DecoderConfig::default().with_diagnostics(true));
        let err = decoder.decode(&buf).unwrap_err();
        assert_eq!(
            decoder.render(&err),
            "wrong header format: magic 'b' missing (0x78) [Field4 at offset 0x001a]"
        );
    }

    #[test]
    fn diagnostics_skip_unpositioned_errors() {
        let decoder = HeaderDecoder::new(DecoderConfig::default().with_diagnostics(true));
        let err = decoder.decode(&[0u8; 5]).unwrap_err();
        assert_eq!(
            decoder.render(&err),
            "buffer too short: 5 bytes, a header needs at least 52"
        );
    }
}
