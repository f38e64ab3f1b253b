/// Decoder settings, fixed when the [`HeaderDecoder`](crate::HeaderDecoder)
/// is built.
///
/// ```text
/// ┌─────────────────────┬────────────────────────────────────────────────┐
/// │ Field               │ Effect                                         │
/// ├─────────────────────┼────────────────────────────────────────────────┤
/// │ include_diagnostics │ Rendered errors end with "[FieldN at offset]"  │
/// └─────────────────────┴────────────────────────────────────────────────┘
/// ```
///
/// Diagnostics only change how errors are *rendered*; the decode result is
/// identical either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    pub include_diagnostics: bool,
}

impl DecoderConfig {
    #[must_use]
    pub fn with_diagnostics(mut self, on: bool) -> Self {
        self.include_diagnostics = on;
        self
    }
}
