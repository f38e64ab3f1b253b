use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;
use xbf_wire::layout::TYPICAL_HEADER_SIZE;

use crate::decoder::HeaderDecoder;
use crate::error::{ResourceError, XbfError};
use crate::header::{HeaderLayout, LABEL_WIDTH, ParsedHeader};

/// Name reported for bitstreams that didn't come from a file.
pub const MEMORY_SOURCE: &str = "(memory)";

/// Bytes backing an [`XbfFile`].
enum Backing {
    Mapped(Mmap),
    Memory(Vec<u8>),
}

impl Backing {
    fn bytes(&self) -> &[u8] {
        match self {
            Backing::Mapped(map) => &map[..],
            Backing::Memory(vec) => vec.as_slice(),
        }
    }
}

/// A bitstream whose header has been decoded, together with the bytes it
/// was decoded from.
///
/// The bytes are either a read-only memory map of a file or an owned
/// buffer. Either way they are released when the `XbfFile` is dropped or
/// [`close`](Self::close)d, including when [`open`](Self::open) fails
/// half-way: the map is owned by a local until decoding succeeds.
///
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ XbfFile                                      │
/// │   name     ← path, or "(memory)"             │
/// │   backing  ← Mmap | Vec<u8>   (None = closed)│
/// │   layout   ← HeaderLayout (byte ranges)      │
/// └──────────────────────────────────────────────┘
/// ```
///
/// [`header`](Self::header) borrows the fields back out of the backing
/// bytes, so the borrow checker keeps the map alive while any field is in
/// use.
pub struct XbfFile {
    name: String,
    path: Option<PathBuf>,
    backing: Option<Backing>,
    layout: HeaderLayout,
}

impl XbfFile {
    /// Map `path` and decode its header with the default decoder.
    ///
    /// # Errors
    ///
    /// See [`open_with`](Self::open_with).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, XbfError> {
        Self::open_with(path, &HeaderDecoder::default())
    }

    /// Map `path` and decode its header.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::Io`] if the file can't be opened or stat'ed.
    /// - [`ResourceError::TooSmall`] if it is shorter than a typical header.
    /// - [`ResourceError::Map`] if mapping fails.
    /// - [`XbfError::Decode`] if the header is malformed.
    pub fn open_with(path: impl AsRef<Path>, decoder: &HeaderDecoder) -> Result<Self, XbfError> {
        let path = path.as_ref();
        let io_err = |source| ResourceError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();
        if size < TYPICAL_HEADER_SIZE as u64 {
            return Err(ResourceError::TooSmall {
                path: path.to_path_buf(),
                size,
                min: TYPICAL_HEADER_SIZE,
            }
            .into());
        }

        // SAFETY: the map is read-only and private to this process. Another
        // process truncating or rewriting the file while it is mapped is the
        // usual mmap caveat and is not guarded against.
        let map = unsafe { Mmap::map(&file) }.map_err(|source| ResourceError::Map {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), len = map.len(), "mapped bitstream");

        let layout = decoder.decode(&map)?.layout().clone();

        Ok(Self {
            name: path.display().to_string(),
            path: Some(path.to_path_buf()),
            backing: Some(Backing::Mapped(map)),
            layout,
        })
    }

    /// Decode a bitstream held in memory with the default decoder.
    ///
    /// # Errors
    ///
    /// Returns [`XbfError::Decode`] if the header is malformed.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, XbfError> {
        Self::from_bytes_with(bytes, &HeaderDecoder::default())
    }

    /// Decode a bitstream held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`XbfError::Decode`] if the header is malformed.
    pub fn from_bytes_with(bytes: Vec<u8>, decoder: &HeaderDecoder) -> Result<Self, XbfError> {
        let layout = decoder.decode(&bytes)?.layout().clone();
        Ok(Self {
            name: MEMORY_SOURCE.to_string(),
            path: None,
            backing: Some(Backing::Memory(bytes)),
            layout,
        })
    }

    /// The decoded header, borrowed from the backing bytes.
    ///
    /// # Errors
    ///
    /// Returns [`XbfError::NotInitialized`] once the file has been closed.
    pub fn header(&self) -> Result<ParsedHeader<'_>, XbfError> {
        self.backing
            .as_ref()
            .and_then(|b| self.layout.view(b.bytes()))
            .ok_or(XbfError::NotInitialized)
    }

    /// Path or `(memory)`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.name
    }

    /// The path the bitstream was mapped from, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.backing.is_some()
    }

    /// Size of the whole bitstream in bytes, or 0 once closed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backing.as_ref().map_or(0, |b| b.bytes().len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release the backing bytes now rather than at drop. Safe to call
    /// more than once.
    pub fn close(&mut self) {
        if let Some(backing) = self.backing.take() {
            if matches!(backing, Backing::Mapped(_)) {
                debug!(path = %self.name, "unmapping bitstream");
            }
            drop(backing);
        }
    }
}

impl fmt::Debug for XbfFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XbfFile")
            .field("name", &self.name)
            .field("open", &self.is_open())
            .field("len", &self.len())
            .field("layout", &self.layout)
            .finish()
    }
}

impl fmt::Display for XbfFile {
    /// The header summary, preceded by the file name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "File name", self.name)?;
        match self.header() {
            Ok(header) => write!(f, "{header}"),
            Err(e) => writeln!(f, "{:>LABEL_WIDTH$}: {e}", "Status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(payload: &[u8]) -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(&[0x00, 0x09]);
        v.extend_from_slice(&[0u8; 9]);
        v.extend_from_slice(&[0x00, 0x01, b'a', 0x00, 0x02, b'n', 0x00]);
        v.extend_from_slice(&[b'b', 0x00, 0x02, b'p', 0x00]);
        v.extend_from_slice(&[b'c', 0x00, 0x0b]);
        v.extend_from_slice(b"2020/01/01\0");
        v.extend_from_slice(&[b'd', 0x00, 0x09]);
        v.extend_from_slice(b"12:00:00\0");
        v.push(b'e');
        v.extend_from_slice(&u32::try_from(payload.len()).unwrap().to_be_bytes());
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn memory_source_is_named() {
        let file = XbfFile::from_bytes(minimal(b"cfg")).unwrap();
        assert_eq!(file.file_name(), MEMORY_SOURCE);
        assert!(file.path().is_none());
        assert_eq!(file.header().unwrap().ncd_name(), "n");
        assert_eq!(file.header().unwrap().payload(), b"cfg");
    }

    #[test]
    fn header_after_close_is_not_initialized() {
        let mut file = XbfFile::from_bytes(minimal(b"")).unwrap();
        file.close();
        file.close();
        assert!(!file.is_open());
        assert_eq!(file.len(), 0);
        assert!(matches!(file.header(), Err(XbfError::NotInitialized)));
    }

    #[test]
    fn bad_bytes_are_rejected() {
        let mut bytes = minimal(b"");
        bytes[13] = b'z';
        assert!(matches!(
            XbfFile::from_bytes(bytes),
            Err(XbfError::Decode(crate::DecodeError::MagicMismatch { expected: 'a', .. }))
        ));
    }

    #[test]
    fn missing_file_is_resource_error() {
        let err = XbfFile::open("/nonexistent/design.bit").unwrap_err();
        assert!(matches!(err, XbfError::Resource(ResourceError::Io { .. })));
    }
}
