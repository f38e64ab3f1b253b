/// Low-level read failures raised by [`Cursor`](crate::Cursor).
///
/// The cursor knows nothing about header fields, so the only thing it can
/// report is where it was and how much it wanted. The decoder attaches the
/// field on top.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// A read of `needed` bytes at `offset` would run past the end of the
    /// buffer, which only had `remaining` bytes left.
    #[error("unexpected end of input at offset {offset}: needed {needed} bytes, {remaining} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}
