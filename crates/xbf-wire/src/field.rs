use std::fmt;

/// The seven header fields, in wire order.
///
/// The numbering follows the layout description the format is usually
/// documented by (the `.bit` FAQ), which counts the magic `a` record as
/// its own field and the payload descriptor as field 7.
///
/// ```text
/// ┌───────┬──────────┬─────────────────────────────────────┐
/// │ Field │ Magic    │ Content                             │
/// ├───────┼──────────┼─────────────────────────────────────┤
/// │ 1     │ —        │ 9 opaque bytes                      │
/// │ 2     │ 'a'      │ (magic only)                        │
/// │ 3     │ —        │ NCD design name, NUL-terminated     │
/// │ 4     │ 'b'      │ part name, NUL-terminated           │
/// │ 5     │ 'c'      │ build date, 11 bytes                │
/// │ 6     │ 'd'      │ build time, 9 bytes                 │
/// │ 7     │ 'e'      │ u32 payload length                  │
/// └───────┴──────────┴─────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Preamble,
    MagicA,
    NcdName,
    PartName,
    Date,
    Time,
    Payload,
}

impl Field {
    /// All fields in the order the decoder walks them.
    pub const ALL: [Field; 7] = [
        Field::Preamble,
        Field::MagicA,
        Field::NcdName,
        Field::PartName,
        Field::Date,
        Field::Time,
        Field::Payload,
    ];

    /// One-based position of the field in the header.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Field::Preamble => 1,
            Field::MagicA => 2,
            Field::NcdName => 3,
            Field::PartName => 4,
            Field::Date => 5,
            Field::Time => 6,
            Field::Payload => 7,
        }
    }

    /// Short human description, used in error messages.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Field::Preamble => "preamble",
            Field::MagicA => "magic 'a'",
            Field::NcdName => "NCD filename",
            Field::PartName => "part name",
            Field::Date => "date",
            Field::Time => "time",
            Field::Payload => "payload descriptor",
        }
    }

    /// The tag byte that opens this field, if it has one.
    ///
    /// Field 2 is special: its length prefix comes first and the `a` is
    /// the field's content. Fields 4 through 7 lead with the tag.
    #[must_use]
    pub fn magic(self) -> Option<u8> {
        match self {
            Field::Preamble | Field::NcdName => None,
            Field::MagicA => Some(b'a'),
            Field::PartName => Some(b'b'),
            Field::Date => Some(b'c'),
            Field::Time => Some(b'd'),
            Field::Payload => Some(b'e'),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field{}", self.number())
    }
}
