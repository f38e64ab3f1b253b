use crate::error::WireError;

/// Forward-only, bounds-checked reader over a borrowed byte slice.
///
/// Every read either returns the requested bytes and advances, or fails
/// with [`WireError::UnexpectedEof`] and leaves the position untouched.
/// Nothing here can index past the end of the slice.
///
/// Slices handed out by [`take`](Self::take) borrow from the underlying
/// buffer (`'a`), not from the cursor, so they stay valid after the cursor
/// is dropped.
///
/// ```text
///   buf:  [ 00 09 | 0f f0 0f f0 0f f0 0f f0 00 | 00 01 | 61 | ... ]
///                  ^
///                  pos = 2 after read_u16_be()
/// ```
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Total length of the underlying buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the next `n` bytes and advance past them.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        let bytes = self.peek(n)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Borrow the next `n` bytes without advancing.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn peek(&self, n: usize) -> Result<&'a [u8], WireError> {
        self.pos
            .checked_add(n)
            .and_then(|end| self.buf.get(self.pos..end))
            .ok_or(WireError::UnexpectedEof {
                offset: self.pos,
                needed: n,
                remaining: self.remaining(),
            })
    }

    /// Advance past `n` bytes without looking at them.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        self.take(n).map(|_| ())
    }

    /// Read a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16_be(&mut self) -> Result<u16, WireError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Read a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if fewer than 4 bytes remain.
    pub fn read_u32_be(&mut self) -> Result<u32, WireError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

// On the "from_be_bytes" calls: the header is written by Xilinx tools in
// network order, so the conversion is explicit and does not depend on the
// host. Indexing `bytes[0]..bytes[3]` cannot panic because `take` already
// guaranteed the slice length.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let buf = [0x00, 0x09, 0x00, 0x0c, 0x90, 0x90];
        let mut cur = Cursor::new(&buf);
        assert_eq!(cur.read_u16_be().unwrap(), 9);
        assert_eq!(cur.read_u32_be().unwrap(), 0x000c_9090);
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn take_borrows_from_buffer() {
        let buf = b"xform.ncd\0rest";
        let name = {
            let mut cur = Cursor::new(buf);
            cur.take(10).unwrap()
        };
        assert_eq!(name, b"xform.ncd\0");
    }

    #[test]
    fn failed_read_does_not_advance() {
        let buf = [0x01, 0x02, 0x03];
        let mut cur = Cursor::new(&buf);
        cur.skip(2).unwrap();
        let err = cur.read_u16_be().unwrap_err();
        assert_eq!(
            err,
            WireError::UnexpectedEof {
                offset: 2,
                needed: 2,
                remaining: 1
            }
        );
        assert_eq!(cur.position(), 2);
        assert_eq!(cur.read_u8().unwrap(), 0x03);
    }

    #[test]
    fn huge_take_fails_closed() {
        let buf = [0u8; 4];
        let mut cur = Cursor::new(&buf);
        cur.skip(1).unwrap();
        assert!(cur.take(usize::MAX).is_err());
    }

    #[test]
    fn peek_leaves_position() {
        let buf = [b'a', b'b'];
        let cur = Cursor::new(&buf);
        assert_eq!(cur.peek(1).unwrap(), b"a");
        assert_eq!(cur.position(), 0);
    }

    #[test]
    fn empty_buffer() {
        let mut cur = Cursor::new(&[]);
        assert!(cur.is_empty());
        assert!(matches!(
            cur.read_u8(),
            Err(WireError::UnexpectedEof { offset: 0, needed: 1, remaining: 0 })
        ));
    }
}
