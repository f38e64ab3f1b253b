use std::path::PathBuf;

use xbf_wire::{Field, WireError};

/// Errors produced while walking a header.
///
/// Each variant is terminal: the decoder stops at the first failed check
/// and returns it. Positioned variants carry the field and the byte offset
/// of the check so callers can format diagnostics however they like.
///
/// ```text
///   DecodeError
///   ├── BufferTooShort      ← buffer can't hold even a minimal header
///   ├── FormatError         ← fixed-size length prefix has the wrong value
///   ├── MagicMismatch       ← tag byte is not the expected letter
///   ├── LengthOverflow      ← declared length runs past the buffer
///   ├── UnterminatedString  ← string field's last byte is not NUL
///   └── Truncated           ← a read crossed the end of the buffer
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is shorter than the smallest possible header.
    #[error("buffer too short: {len} bytes, a header needs at least {min}")]
    BufferTooShort { len: usize, min: usize },

    /// A length prefix that must hold an exact constant holds something else.
    #[error("wrong header format: {field}'s length should be {expected}, but is {found}")]
    FormatError {
        field: Field,
        expected: u16,
        found: u16,
        offset: usize,
    },

    /// The tag byte opening a field is wrong.
    #[error("wrong header format: magic '{expected}' missing ({found:#04x})")]
    MagicMismatch {
        field: Field,
        expected: char,
        found: u8,
        offset: usize,
    },

    /// A declared length is not strictly less than the bytes remaining.
    #[error(
        "wrong header format: {} length {declared} is too long ({remaining} bytes remaining)",
        .field.description()
    )]
    LengthOverflow {
        field: Field,
        declared: u32,
        remaining: usize,
        offset: usize,
    },

    /// A string field does not end in a NUL byte.
    #[error("wrong header format: {} isn't terminated with 0", .field.description())]
    UnterminatedString { field: Field, offset: usize },

    /// A read inside `field` ran off the end of the buffer.
    #[error("header truncated in {field}: {source}")]
    Truncated {
        field: Field,
        #[source]
        source: WireError,
    },
}

impl DecodeError {
    /// Field whose check failed, if the error is tied to one.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            DecodeError::BufferTooShort { .. } => None,
            DecodeError::FormatError { field, .. }
            | DecodeError::MagicMismatch { field, .. }
            | DecodeError::LengthOverflow { field, .. }
            | DecodeError::UnterminatedString { field, .. }
            | DecodeError::Truncated { field, .. } => Some(*field),
        }
    }

    /// Byte offset of the failing check, if known.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::BufferTooShort { .. } => None,
            DecodeError::FormatError { offset, .. }
            | DecodeError::MagicMismatch { offset, .. }
            | DecodeError::LengthOverflow { offset, .. }
            | DecodeError::UnterminatedString { offset, .. } => Some(*offset),
            DecodeError::Truncated {
                source: WireError::UnexpectedEof { offset, .. },
                ..
            } => Some(*offset),
        }
    }
}

/// Failures acquiring the bytes to decode.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The file could not be opened or stat'ed.
    #[error("couldn't open file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is too small to contain a header.
    #[error("file '{}' doesn't contain valid data ({size} bytes, need at least {min})", .path.display())]
    TooSmall { path: PathBuf, size: u64, min: usize },

    /// The file could not be mapped into memory.
    #[error("couldn't map file '{}' to memory", .path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error of the file-level API.
#[derive(Debug, thiserror::Error)]
pub enum XbfError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// A header was requested from an [`XbfFile`](crate::XbfFile) that has
    /// already been closed.
    #[error("bitstream is not open: call XbfFile::open before reading the header")]
    NotInitialized,
}

/// Errors that can point at a spot in the header.
///
/// Used by [`HeaderDecoder::render`](crate::HeaderDecoder::render) to
/// append `[FieldN at offset 0x....]` when diagnostics are enabled.
pub trait Located {
    fn location(&self) -> Option<(Field, usize)>;
}

impl Located for DecodeError {
    fn location(&self) -> Option<(Field, usize)> {
        self.field().zip(self.offset())
    }
}

impl Located for XbfError {
    fn location(&self) -> Option<(Field, usize)> {
        match self {
            XbfError::Decode(e) => e.location(),
            XbfError::Resource(_) | XbfError::NotInitialized => None,
        }
    }
}
