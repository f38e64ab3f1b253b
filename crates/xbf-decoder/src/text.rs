use std::fmt;
use std::str::Utf8Error;

/// A string field of the header, borrowed from the source buffer.
///
/// Holds the bytes *before* the NUL terminator. The format doesn't promise
/// any encoding, so the bytes are kept as-is: `Display` is lossy, and
/// [`to_str`](Self::to_str) is the strict alternative.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HeaderText<'a>(&'a [u8]);

impl<'a> HeaderText<'a> {
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    /// The raw bytes, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// The bytes as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Utf8Error`] if the field isn't valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for HeaderText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&String::from_utf8_lossy(self.0), f)
    }
}

impl fmt::Debug for HeaderText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(self.0), f)
    }
}

impl PartialEq<str> for HeaderText<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderText<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<[u8]> for HeaderText<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_with_str() {
        let text = HeaderText::new(b"xform.ncd");
        assert_eq!(text, "xform.ncd");
        assert_ne!(text, "xform.bit");
    }

    #[test]
    fn display_is_lossy() {
        let text = HeaderText::new(&[b'v', 0xff, b'2']);
        assert_eq!(text.to_string(), "v\u{fffd}2");
        assert!(text.to_str().is_err());
    }

    #[test]
    fn display_honours_padding() {
        let text = HeaderText::new(b"ab");
        assert_eq!(format!("{text:>4}"), "  ab");
    }
}
