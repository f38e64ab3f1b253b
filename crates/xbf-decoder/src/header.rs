use std::fmt;
use std::ops::Range;

use crate::text::HeaderText;

/// Width of the right-aligned labels in the field summary.
pub const LABEL_WIDTH: usize = 12;

/// Byte ranges of a validated header, independent of any buffer.
///
/// This is the owned half of a decode result. It can be stored next to the
/// buffer it was produced from (see [`XbfFile`](crate::XbfFile)) and turned
/// back into a borrowed [`ParsedHeader`] with [`view`](Self::view).
///
/// String ranges exclude the NUL terminator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeaderLayout {
    pub preamble: Range<usize>,
    pub ncd_name: Range<usize>,
    pub part_name: Range<usize>,
    pub date: Range<usize>,
    pub time: Range<usize>,
    pub payload_offset: usize,
    pub payload_length: u32,
}

impl HeaderLayout {
    /// Range of the configuration payload.
    #[must_use]
    pub fn payload_range(&self) -> Range<usize> {
        let len = usize::try_from(self.payload_length).unwrap_or(usize::MAX);
        self.payload_offset..self.payload_offset.saturating_add(len)
    }

    /// Re-borrow the header from `buf`.
    ///
    /// Returns `None` if any range does not fit inside `buf`, which means
    /// `buf` is not the buffer this layout was decoded from.
    #[must_use]
    pub fn view<'a>(&self, buf: &'a [u8]) -> Option<ParsedHeader<'a>> {
        let text = |r: &Range<usize>| buf.get(r.clone()).map(HeaderText::new);
        Some(ParsedHeader {
            preamble: buf.get(self.preamble.clone())?,
            ncd_name: text(&self.ncd_name)?,
            part_name: text(&self.part_name)?,
            date: text(&self.date)?,
            time: text(&self.time)?,
            payload: buf.get(self.payload_range())?,
            layout: self.clone(),
        })
    }
}

/// Validated view over a bitstream header.
///
/// Every field borrows from the buffer handed to the decoder; nothing is
/// copied. The lifetime keeps the view from outliving that buffer.
///
/// ```text
/// ┌────────────────────────────────────────────────────────┐
/// │ ParsedHeader<'a>                                       │
/// │   ncd_name / part_name / date / time ─► &'a [u8]       │
/// │   payload                            ─► &'a [u8]       │
/// │   layout: HeaderLayout  ← the same, as byte ranges     │
/// └────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    pub(crate) preamble: &'a [u8],
    pub(crate) ncd_name: HeaderText<'a>,
    pub(crate) part_name: HeaderText<'a>,
    pub(crate) date: HeaderText<'a>,
    pub(crate) time: HeaderText<'a>,
    pub(crate) payload: &'a [u8],
    pub(crate) layout: HeaderLayout,
}

impl<'a> ParsedHeader<'a> {
    /// NCD design name (Field 3).
    #[must_use]
    pub fn ncd_name(&self) -> HeaderText<'a> {
        self.ncd_name
    }

    /// Target part name (Field 4).
    #[must_use]
    pub fn part_name(&self) -> HeaderText<'a> {
        self.part_name
    }

    /// Build date (Field 5).
    #[must_use]
    pub fn date(&self) -> HeaderText<'a> {
        self.date
    }

    /// Build time (Field 6).
    #[must_use]
    pub fn time(&self) -> HeaderText<'a> {
        self.time
    }

    /// The 9 opaque bytes of Field 1.
    #[must_use]
    pub fn preamble(&self) -> &'a [u8] {
        self.preamble
    }

    /// Offset of the first payload byte, which is also the header length.
    #[must_use]
    pub fn payload_offset(&self) -> usize {
        self.layout.payload_offset
    }

    /// Declared payload length from Field 7.
    #[must_use]
    pub fn payload_length(&self) -> u32 {
        self.layout.payload_length
    }

    /// The configuration payload. Not interpreted.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    #[must_use]
    pub fn layout(&self) -> &HeaderLayout {
        &self.layout
    }
}

impl fmt::Display for ParsedHeader<'_> {
    /// One `label: value` line per field, labels right-aligned.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "NCD filename", self.ncd_name)?;
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "Part name", self.part_name)?;
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "Date", self.date)?;
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "Time", self.time)?;
        writeln!(f, "{:>LABEL_WIDTH$}: {}", "Image length", self.payload_length())
    }
}
