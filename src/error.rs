use thiserror::Error;

/// Error surfaced by a [`TextBuffer`](crate::TextBuffer) implementation.
///
/// The engine never retries or rewrites buffer errors; they propagate to the
/// caller unchanged inside [`EngineError::Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("offset {offset} is outside the buffer (len {len})")]
    OutOfRange { offset: usize, len: usize },
}

/// Everything that can go wrong while executing a command.
///
/// A failed command leaves the buffer, cursor, and registers untouched:
/// motion and text-object resolution always run before the first mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// An operator was given without a motion or text object.
    #[error("operator requires a motion or text object")]
    InvalidCommand,

    /// The motion could not be resolved (missing character argument,
    /// no match for a find, no recorded find to repeat).
    #[error("motion could not be resolved")]
    InvalidMotion,

    /// No enclosing text object was found at the cursor.
    #[error("no enclosing text object found")]
    InvalidTextObject,

    /// An operator was applied to an empty buffer.
    #[error("buffer is empty")]
    BufferEmpty,

    /// The supplied cursor does not lie within the buffer.
    #[error("cursor offset {offset} is out of bounds (len {len})")]
    OutOfBounds { offset: usize, len: usize },

    /// Propagated from the text buffer collaborator.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
