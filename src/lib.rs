//! A byte-accurate modal text-editing command engine.
//!
//! The engine interprets fully-parsed modal commands — operator plus motion,
//! operator plus text object, or a bare motion — against a host-provided
//! buffer implementing [`TextBuffer`]. All positions are byte offsets; every
//! offset the engine produces lands on a UTF-8 code-point boundary. The
//! engine never renders, never reads keys, and never owns the text: it is a
//! pure command layer the host drives.
//!
//! ```
//! use modal_engine::{Command, Engine, Motion, Operator};
//! # use modal_engine::{BufferError, Range, TextBuffer};
//! # use std::borrow::Cow;
//! # struct Buf(Vec<u8>);
//! # impl TextBuffer for Buf {
//! #     fn len(&self) -> usize { self.0.len() }
//! #     fn slice(&self, r: Range) -> Result<Cow<'_, [u8]>, BufferError> {
//! #         Ok(Cow::Borrowed(&self.0[r.start..r.end]))
//! #     }
//! #     fn insert(&mut self, at: usize, b: &[u8]) -> Result<(), BufferError> {
//! #         self.0.splice(at..at, b.iter().copied()); Ok(())
//! #     }
//! #     fn delete(&mut self, at: usize, n: usize) -> Result<(), BufferError> {
//! #         self.0.drain(at..at + n); Ok(())
//! #     }
//! # }
//! let mut engine = Engine::new();
//! let mut buf = Buf(b"hello world".to_vec());
//! // `dw` at offset 0 deletes "hello ".
//! let cmd = Command::operator(Operator::Delete, Motion::WordForward);
//! let cursor = engine.execute_command(&mut buf, 0, &cmd).unwrap();
//! assert_eq!(cursor, 0);
//! assert_eq!(buf.0, b"world");
//! ```

pub mod engine;
pub mod error;
pub mod motion;
mod operator;
pub mod registers;
pub mod text_object;
pub mod traits;
pub mod types;

pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot, SearchDirection};
pub use crate::error::{BufferError, EngineError};
pub use crate::registers::{RegisterStore, UNNAMED_REGISTER};
pub use crate::traits::TextBuffer;
pub use crate::types::{
    Command, Mode, Motion, ObjectKind, Operator, Range, Scope, TextObject,
};
