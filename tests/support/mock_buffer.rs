use std::borrow::Cow;

use modal_engine::{BufferError, Range, TextBuffer};
use ropey::Rope;

/// Rope-backed buffer for exercising the engine. Offsets in the trait are
/// bytes; ropey indexes by chars, so the impl converts at the boundary.
pub struct MockBuffer {
    rope: Rope,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn check(&self, offset: usize) -> Result<usize, BufferError> {
        if offset > self.rope.len_bytes() {
            return Err(BufferError::OutOfRange {
                offset,
                len: self.rope.len_bytes(),
            });
        }
        Ok(self.rope.byte_to_char(offset))
    }
}

impl TextBuffer for MockBuffer {
    fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    fn slice(&self, range: Range) -> Result<Cow<'_, [u8]>, BufferError> {
        let start = self.check(range.start)?;
        let end = self.check(range.end)?;
        let s: String = self.rope.slice(start..end).to_string();
        Ok(Cow::Owned(s.into_bytes()))
    }

    fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<(), BufferError> {
        let at = self.check(offset)?;
        let s = std::str::from_utf8(bytes).expect("test data is UTF-8");
        self.rope.insert(at, s);
        Ok(())
    }

    fn delete(&mut self, offset: usize, count: usize) -> Result<(), BufferError> {
        let start = self.check(offset)?;
        let end = self.check(offset + count)?;
        self.rope.remove(start..end);
        Ok(())
    }
}
