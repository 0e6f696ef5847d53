//! Registers — named storage for yanked and deleted text.
//!
//! Every delete, change, and yank copies the affected bytes into a register
//! before the buffer is touched, so the host can paste them back later.
//! Writes replace the register's previous contents wholesale; there is no
//! append mode in this design.

use std::collections::HashMap;

/// The register targeted when a command names none.
pub const UNNAMED_REGISTER: char = '"';

/// A mapping from one-character register names to owned byte buffers.
///
/// Owned by the [`Engine`](crate::Engine) for the session's lifetime and
/// mutated only through operator execution (or directly by the host, e.g.
/// to seed a register before a paste).
#[derive(Debug, Clone, Default)]
pub struct RegisterStore {
    slots: HashMap<char, Vec<u8>>,
}

impl RegisterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` in the named register, discarding prior contents.
    pub fn write(&mut self, name: char, bytes: Vec<u8>) {
        self.slots.insert(name, bytes);
    }

    /// The register's current contents, if it has ever been written.
    pub fn read(&self, name: char) -> Option<&[u8]> {
        self.slots.get(&name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
