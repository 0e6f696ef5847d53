use std::borrow::Cow;

use crate::error::BufferError;
use crate::types::Range;

/// The engine's view of the host's text storage.
///
/// Implementations own the actual storage strategy (rope, piece table, flat
/// vector); the engine only needs these four operations. All offsets crossing
/// this boundary are byte offsets, and the engine guarantees they land on
/// UTF-8 code-point boundaries before calling in.
pub trait TextBuffer {
    /// Current length in bytes.
    fn len(&self) -> usize;

    /// Read-only copy of `[start, end)`. Fails with
    /// [`BufferError::OutOfRange`] when `end` exceeds the buffer.
    fn slice(&self, range: Range) -> Result<Cow<'_, [u8]>, BufferError>;

    /// Insert `bytes` at `offset`. Fails when `offset > len()`.
    fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<(), BufferError>;

    /// Remove `count` bytes starting at `offset`. Fails when
    /// `offset + count > len()`.
    fn delete(&mut self, offset: usize, count: usize) -> Result<(), BufferError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
