//! Engine state and command dispatch.
//!
//! The engine owns everything that outlives a single command: mode, pending
//! count/operator/register, registers, marks, the jump list, the visual
//! anchor, and the last dot-repeatable command. It borrows the host's buffer
//! only for the duration of one [`Engine::execute_command`] call, which
//! either moves the cursor (bare motion) or resolves a range and hands it to
//! the operator executor. Resolution always precedes mutation, so a failed
//! command leaves every collaborator untouched.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::EngineError;
use crate::motion;
use crate::operator;
use crate::registers::RegisterStore;
use crate::text_object;
use crate::traits::TextBuffer;
use crate::types::{Command, Mode, Motion, Operator, Range};

/// Accumulated count digits, entered before a command is complete.
#[derive(Debug, Default, Clone)]
struct Counts {
    current: Option<u32>,
}

impl Counts {
    fn push_digit(&mut self, d: u32) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d);
        self.current = Some(next);
    }

    fn take_or(&mut self, fallback: u32) -> u32 {
        let v = self.current.take().unwrap_or(fallback);
        v.max(1)
    }
}

/// The most recent find/till motion, replayed by [`Motion::RepeatFind`].
#[derive(Debug, Clone, Copy)]
struct LastFind {
    motion: Motion,
    ch: char,
}

/// Which way the last search ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Ordered saved offsets plus a position within them. Pushing a new jump
/// truncates any forward history, like a browser's back stack.
#[derive(Debug, Default, Clone)]
struct JumpList {
    entries: Vec<usize>,
    index: usize,
}

impl JumpList {
    fn push(&mut self, offset: usize) {
        self.entries.truncate(self.index);
        if self.entries.last() != Some(&offset) {
            self.entries.push(offset);
        }
        self.index = self.entries.len();
    }

    fn back(&mut self, current: usize) -> Option<usize> {
        if self.index == 0 {
            return None;
        }
        if self.index == self.entries.len() {
            // Save the departure point so `forward` can return to it.
            self.entries.push(current);
        }
        self.index -= 1;
        self.entries.get(self.index).copied()
    }

    fn forward(&mut self) -> Option<usize> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).copied()
    }
}

/// Session-level engine state.
///
/// Created once per buffer/session; mutated exclusively through its methods.
/// Registers and marks live here by design — no globals, no statics.
#[derive(Debug, Clone)]
pub struct Engine {
    mode: Mode,
    counts: Counts,
    pending_operator: Option<Operator>,
    pending_register: Option<char>,
    registers: RegisterStore,
    marks: HashMap<char, usize>,
    jumps: JumpList,
    visual_anchor: Option<usize>,
    last_dot: Option<Command>,
    last_find: Option<LastFind>,
    last_search: Option<(String, SearchDirection)>,
    indent_unit: String,
}

/// A read-only view of the transient engine state, for status lines.
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub pending_count: Option<u32>,
    pub pending_operator: Option<Operator>,
    pub pending_register: Option<char>,
}

pub struct EngineBuilder {
    mode: Mode,
    indent_unit: String,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            indent_unit: "    ".to_string(),
        }
    }
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// The unit prepended/stripped by the indent and outdent operators.
    pub fn indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            mode: self.mode,
            counts: Counts::default(),
            pending_operator: None,
            pending_register: None,
            registers: RegisterStore::new(),
            marks: HashMap::new(),
            jumps: JumpList::default(),
            visual_anchor: None,
            last_dot: None,
            last_find: None,
            last_search: None,
            indent_unit: self.indent_unit,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            pending_count: self.counts.current,
            pending_operator: self.pending_operator,
            pending_register: self.pending_register,
        }
    }

    // ── Command execution ────────────────────────────────────────────

    /// Execute one fully-resolved command against the buffer.
    ///
    /// Returns the new cursor offset. With an operator, the target range is
    /// resolved from the motion or text object and the operator is applied;
    /// the command then becomes the dot-repeat target. A bare motion only
    /// moves the cursor and is never dot-repeatable.
    pub fn execute_command<B: TextBuffer>(
        &mut self,
        buf: &mut B,
        cursor: usize,
        cmd: &Command,
    ) -> Result<usize, EngineError> {
        let len = buf.len();
        if cursor > len {
            return Err(EngineError::OutOfBounds {
                offset: cursor,
                len,
            });
        }
        debug!(
            operator = ?cmd.operator,
            motion = ?cmd.motion,
            text_object = ?cmd.text_object,
            count = cmd.count,
            register = %cmd.register,
            cursor,
            "execute command"
        );

        let text = buf.slice(Range::new(0, len))?.into_owned();

        match cmd.operator {
            Some(op) => {
                if cmd.motion.is_none() && cmd.text_object.is_none() {
                    return Err(EngineError::InvalidCommand);
                }
                if len == 0 {
                    return Err(EngineError::BufferEmpty);
                }
                let range = if let Some(m) = cmd.motion {
                    let target = self.resolve_motion(&text, cursor, m, cmd)?;
                    Range::ordered(cursor, target)
                } else if let Some(obj) = cmd.text_object {
                    text_object::resolve(&text, cursor, obj)?
                } else {
                    unreachable!("validated above")
                };
                trace!(start = range.start, end = range.end, "operator range");

                let outcome = operator::apply(
                    op,
                    buf,
                    &text,
                    range,
                    cmd.register,
                    &mut self.registers,
                    &self.indent_unit,
                    cursor,
                )?;
                if let Some(mode) = outcome.mode {
                    self.mode = mode;
                }
                self.last_dot = Some(*cmd);
                Ok(outcome.cursor)
            }
            None => {
                let m = cmd.motion.ok_or(EngineError::InvalidCommand)?;
                self.resolve_motion(&text, cursor, m, cmd)
            }
        }
    }

    /// Re-execute the last operator-bearing command (dot-repeat).
    pub fn repeat_last<B: TextBuffer>(
        &mut self,
        buf: &mut B,
        cursor: usize,
    ) -> Result<usize, EngineError> {
        let cmd = self.last_dot.ok_or(EngineError::InvalidCommand)?;
        self.execute_command(buf, cursor, &cmd)
    }

    /// The stored dot-repeat target, if any command has set one.
    pub fn last_command(&self) -> Option<Command> {
        self.last_dot
    }

    /// Resolve a motion, substituting the recorded find for `RepeatFind`
    /// and recording find/till motions for later repetition.
    fn resolve_motion(
        &mut self,
        text: &[u8],
        cursor: usize,
        m: Motion,
        cmd: &Command,
    ) -> Result<usize, EngineError> {
        let (concrete, arg) = match (m, self.last_find) {
            (Motion::RepeatFind, Some(lf)) => (lf.motion, Some(lf.ch)),
            (Motion::RepeatFind, None) => return Err(EngineError::InvalidMotion),
            _ => (m, cmd.char_arg),
        };
        let target = motion::resolve(text, cursor, concrete, cmd.count, arg)?;
        if m.needs_char()
            && let Some(ch) = cmd.char_arg
        {
            self.last_find = Some(LastFind { motion: m, ch });
        }
        Ok(target)
    }

    // ── Mode ─────────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Mode transitions other than `change` are the key parser's call; it
    /// writes the field through here.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    // ── Pending command state (accumulated by the key parser) ────────

    pub fn push_count_digit(&mut self, digit: u32) {
        self.counts.push_digit(digit);
    }

    pub fn pending_count(&self) -> Option<u32> {
        self.counts.current
    }

    /// Take the accumulated count, defaulting to 1.
    pub fn take_count(&mut self) -> u32 {
        self.counts.take_or(1)
    }

    pub fn set_pending_operator(&mut self, op: Operator) {
        self.pending_operator = Some(op);
    }

    pub fn take_pending_operator(&mut self) -> Option<Operator> {
        self.pending_operator.take()
    }

    pub fn set_pending_register(&mut self, name: char) {
        self.pending_register = Some(name);
    }

    pub fn take_pending_register(&mut self) -> Option<char> {
        self.pending_register.take()
    }

    /// Drop all pending state (Esc in normal mode).
    pub fn cancel_pending(&mut self) {
        self.counts.current = None;
        self.pending_operator = None;
        self.pending_register = None;
    }

    // ── Registers ────────────────────────────────────────────────────

    pub fn registers(&self) -> &RegisterStore {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterStore {
        &mut self.registers
    }

    // ── Marks ────────────────────────────────────────────────────────

    pub fn set_mark(&mut self, name: char, offset: usize) {
        self.marks.insert(name, offset);
    }

    pub fn mark(&self, name: char) -> Option<usize> {
        self.marks.get(&name).copied()
    }

    // ── Jump list ────────────────────────────────────────────────────

    /// Record `offset` before a long-distance move.
    pub fn push_jump(&mut self, offset: usize) {
        self.jumps.push(offset);
    }

    /// Step back through the jump list, saving `current` for `jump_forward`.
    pub fn jump_back(&mut self, current: usize) -> Option<usize> {
        self.jumps.back(current)
    }

    pub fn jump_forward(&mut self) -> Option<usize> {
        self.jumps.forward()
    }

    // ── Visual selection anchor ──────────────────────────────────────

    pub fn set_visual_anchor(&mut self, offset: usize) {
        self.visual_anchor = Some(offset);
    }

    pub fn clear_visual_anchor(&mut self) {
        self.visual_anchor = None;
    }

    /// The normalized selection between the anchor and `cursor`.
    pub fn visual_range(&self, cursor: usize) -> Option<Range> {
        self.visual_anchor
            .map(|anchor| Range::ordered(anchor, cursor))
    }

    // ── Search state (resolution is the host's concern) ──────────────

    pub fn set_last_search(&mut self, pattern: impl Into<String>, direction: SearchDirection) {
        self.last_search = Some((pattern.into(), direction));
    }

    pub fn last_search(&self) -> Option<(&str, SearchDirection)> {
        self.last_search
            .as_ref()
            .map(|(p, d)| (p.as_str(), *d))
    }
}
