//! Motions — pure cursor-movement computations over buffer bytes.
//!
//! Every function here maps `(text, offset)` to a new offset without side
//! effects. Offsets are byte offsets and every returned offset lands on a
//! UTF-8 code-point boundary; scanning steps over continuation bytes
//! (`0b10xxxxxx`) explicitly rather than indexing by character.
//!
//! Counted motions are applied iteratively: `3w` runs the single-step `w`
//! three times, each step starting from the previous result. This matters on
//! irregular whitespace, where N independent jumps can stop somewhere a
//! closed-form "advance past N words" scan would not.

use crate::error::EngineError;
use crate::types::Motion;

/// Resolve a motion to its target offset.
///
/// The effective count is `max(count, 1)`. Find/till motions require
/// `char_arg` and fail with [`EngineError::InvalidMotion`] when the character
/// is missing or not found; [`Motion::RepeatFind`] is rejected here because
/// the recorded find lives in engine state — the engine substitutes the
/// concrete motion before calling.
///
/// A large count costs O(count) single steps; callers should cap counts
/// before dispatch.
pub fn resolve(
    text: &[u8],
    pos: usize,
    motion: Motion,
    count: u32,
    char_arg: Option<char>,
) -> Result<usize, EngineError> {
    let times = count.max(1);
    let mut cur = pos.min(text.len());
    for _ in 0..times {
        let next = step(text, cur, motion, char_arg)?;
        if next == cur {
            // Hit a boundary; every further repeat is the same no-op.
            break;
        }
        cur = next;
    }
    Ok(cur)
}

fn step(text: &[u8], pos: usize, motion: Motion, arg: Option<char>) -> Result<usize, EngineError> {
    let len = text.len();
    let target = match motion {
        Motion::Left => {
            if pos == 0 {
                0
            } else {
                prev_boundary(text, pos)
            }
        }
        Motion::Right => next_boundary(text, pos),
        Motion::Up => up(text, pos),
        Motion::Down => down(text, pos),

        Motion::WordForward => word_forward(text, pos, false),
        Motion::WordBackward => word_backward(text, pos, false),
        Motion::WordEnd => word_end(text, pos, false),
        Motion::BigWordForward => word_forward(text, pos, true),
        Motion::BigWordBackward => word_backward(text, pos, true),
        Motion::BigWordEnd => word_end(text, pos, true),

        Motion::LineStart => line_start(text, pos),
        Motion::LineEnd => line_end(text, pos),
        Motion::LineFirstChar => line_first_char(text, pos),

        Motion::FileStart => 0,
        Motion::FileEnd => len,

        Motion::ParagraphForward => paragraph_forward(text, pos),
        Motion::ParagraphBackward => paragraph_backward(text, pos),
        Motion::SentenceForward => sentence_forward(text, pos),
        Motion::SentenceBackward => sentence_backward(text, pos),

        Motion::MatchingBracket => {
            matching_bracket(text, pos).ok_or(EngineError::InvalidMotion)?
        }

        Motion::FindChar | Motion::TillChar => {
            let ch = arg.ok_or(EngineError::InvalidMotion)?;
            find_forward(text, pos, ch, motion == Motion::TillChar)
                .ok_or(EngineError::InvalidMotion)?
        }
        Motion::FindCharBackward | Motion::TillCharBackward => {
            let ch = arg.ok_or(EngineError::InvalidMotion)?;
            find_backward(text, pos, ch, motion == Motion::TillCharBackward)
                .ok_or(EngineError::InvalidMotion)?
        }

        // Only meaningful with the engine's recorded find state.
        Motion::RepeatFind => return Err(EngineError::InvalidMotion),
    };
    Ok(target)
}

// ---------------------------------------------------------------------------
// UTF-8 boundary arithmetic
// ---------------------------------------------------------------------------

const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// The next code-point boundary after `pos`, clamped to `text.len()`.
pub(crate) fn next_boundary(text: &[u8], pos: usize) -> usize {
    let len = text.len();
    if pos >= len {
        return len;
    }
    let mut i = pos + 1;
    while i < len && is_continuation(text[i]) {
        i += 1;
    }
    i
}

/// The previous code-point boundary before `pos` (0 at the start).
pub(crate) fn prev_boundary(text: &[u8], pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut i = pos.min(text.len()) - 1;
    while i > 0 && is_continuation(text[i]) {
        i -= 1;
    }
    i
}

/// Floor `pos` to the nearest boundary at or before it.
fn snap_boundary(text: &[u8], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i > 0 && i < text.len() && is_continuation(text[i]) {
        i -= 1;
    }
    i
}

/// Decode the code point starting at `pos`, if any.
pub(crate) fn char_at(text: &[u8], pos: usize) -> Option<char> {
    if pos >= text.len() {
        return None;
    }
    let end = next_boundary(text, pos);
    std::str::from_utf8(&text[pos..end]).ok()?.chars().next()
}

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Other non-whitespace (operators, brackets, ...).
    Punct,
    /// Whitespace, including line endings.
    Blank,
}

pub(crate) fn classify(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Blank
    } else if ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// WORD classification: only blank vs non-blank matters.
fn classify_big(ch: char) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Blank
    } else {
        CharClass::Word
    }
}

pub(crate) fn class_at(text: &[u8], pos: usize, big: bool) -> Option<CharClass> {
    let ch = char_at(text, pos)?;
    Some(if big { classify_big(ch) } else { classify(ch) })
}

// ---------------------------------------------------------------------------
// Line geometry
// ---------------------------------------------------------------------------

/// Byte offset of the first character of the line containing `pos`.
pub(crate) fn line_start(text: &[u8], pos: usize) -> usize {
    let mut i = pos.min(text.len());
    while i > 0 && text[i - 1] != b'\n' {
        i -= 1;
    }
    i
}

/// Offset of the line's terminating `\n`, or `text.len()` on the last line.
pub(crate) fn line_end(text: &[u8], pos: usize) -> usize {
    let len = text.len();
    let mut i = pos.min(len);
    while i < len && text[i] != b'\n' {
        i += 1;
    }
    i
}

fn line_first_char(text: &[u8], pos: usize) -> usize {
    let start = line_start(text, pos);
    let end = line_end(text, pos);
    let mut i = start;
    while i < end {
        match char_at(text, i) {
            Some(c) if c.is_whitespace() => i = next_boundary(text, i),
            _ => return i,
        }
    }
    start
}

fn up(text: &[u8], pos: usize) -> usize {
    let start = line_start(text, pos);
    if start == 0 {
        return pos; // already on the first line
    }
    let col = pos - start;
    let prev_start = line_start(text, start - 1);
    let prev_len = (start - 1) - prev_start;
    snap_boundary(text, prev_start + col.min(prev_len))
}

fn down(text: &[u8], pos: usize) -> usize {
    let end = line_end(text, pos);
    if end >= text.len() {
        return pos; // already on the last line
    }
    let col = pos - line_start(text, pos);
    let next_start = end + 1;
    let next_len = line_end(text, next_start) - next_start;
    snap_boundary(text, next_start + col.min(next_len))
}

// ---------------------------------------------------------------------------
// Word motions
// ---------------------------------------------------------------------------

/// Skip the rest of the current word, then following whitespace; land on the
/// first character of the next word (or end of buffer).
fn word_forward(text: &[u8], pos: usize, big: bool) -> usize {
    let len = text.len();
    let mut i = pos;
    if let Some(cls) = class_at(text, i, big)
        && cls != CharClass::Blank
    {
        while i < len && class_at(text, i, big) == Some(cls) {
            i = next_boundary(text, i);
        }
    }
    while i < len && class_at(text, i, big) == Some(CharClass::Blank) {
        i = next_boundary(text, i);
    }
    i
}

/// Skip trailing whitespace backward, then the word, landing on its first
/// character.
fn word_backward(text: &[u8], pos: usize, big: bool) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut i = prev_boundary(text, pos);
    while i > 0 && class_at(text, i, big) == Some(CharClass::Blank) {
        i = prev_boundary(text, i);
    }
    let Some(cls) = class_at(text, i, big) else {
        return 0;
    };
    if cls == CharClass::Blank {
        return 0; // nothing but whitespace back to the start
    }
    while i > 0 && class_at(text, prev_boundary(text, i), big) == Some(cls) {
        i = prev_boundary(text, i);
    }
    i
}

/// From `pos + 1`, skip whitespace, then land on the last character of the
/// word found there.
fn word_end(text: &[u8], pos: usize, big: bool) -> usize {
    let len = text.len();
    if pos >= len {
        return pos;
    }
    let mut i = next_boundary(text, pos);
    while i < len && class_at(text, i, big) == Some(CharClass::Blank) {
        i = next_boundary(text, i);
    }
    if i >= len {
        return pos; // no word ahead
    }
    let cls = class_at(text, i, big);
    loop {
        let n = next_boundary(text, i);
        if n >= len || class_at(text, n, big) != cls {
            return i;
        }
        i = n;
    }
}

// ---------------------------------------------------------------------------
// Paragraphs and sentences
// ---------------------------------------------------------------------------

/// Start of the next blank line, or end of buffer.
fn paragraph_forward(text: &[u8], pos: usize) -> usize {
    let len = text.len();
    let first_end = line_end(text, pos);
    if first_end >= len {
        return len;
    }
    let mut start = first_end + 1;
    loop {
        let end = line_end(text, start);
        if end == start {
            return start; // blank line
        }
        if end >= len {
            return len;
        }
        start = end + 1;
    }
}

/// Start of the previous blank line, or offset 0.
fn paragraph_backward(text: &[u8], pos: usize) -> usize {
    let mut start = line_start(text, pos);
    while start > 0 {
        start = line_start(text, start - 1);
        if line_end(text, start) == start {
            return start; // blank line
        }
    }
    0
}

const fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// First non-blank after the next `.`/`!`/`?` + whitespace, or end of buffer.
fn sentence_forward(text: &[u8], pos: usize) -> usize {
    let len = text.len();
    let mut i = pos;
    while i < len {
        if char_at(text, i).is_some_and(is_sentence_end) {
            let mut j = next_boundary(text, i);
            if j >= len {
                return len;
            }
            if char_at(text, j).is_some_and(char::is_whitespace) {
                while j < len && char_at(text, j).is_some_and(char::is_whitespace) {
                    j = next_boundary(text, j);
                }
                return j;
            }
        }
        i = next_boundary(text, i);
    }
    len
}

/// Start of the sentence before the cursor, or offset 0.
fn sentence_backward(text: &[u8], pos: usize) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut i = prev_boundary(text, pos);
    while i > 0 && char_at(text, i).is_some_and(char::is_whitespace) {
        i = prev_boundary(text, i);
    }
    loop {
        if i == 0 {
            return 0;
        }
        let p = prev_boundary(text, i);
        if char_at(text, i).is_some_and(char::is_whitespace)
            && char_at(text, p).is_some_and(is_sentence_end)
        {
            let len = text.len();
            let mut start = i;
            while start < len && char_at(text, start).is_some_and(char::is_whitespace) {
                start = next_boundary(text, start);
            }
            return start;
        }
        i = p;
    }
}

// ---------------------------------------------------------------------------
// Bracket matching and character search
// ---------------------------------------------------------------------------

const BRACKET_PAIRS: [(u8, u8); 3] = [(b'(', b')'), (b'[', b']'), (b'{', b'}')];

/// Jump to the partner of the bracket under the cursor, falling forward to
/// the first bracket on the rest of the line.
fn matching_bracket(text: &[u8], pos: usize) -> Option<usize> {
    let end = line_end(text, pos);
    let mut i = pos.min(end);
    while i < end {
        let b = text[i];
        if let Some(&(open, close)) = BRACKET_PAIRS.iter().find(|&&(o, c)| b == o || b == c) {
            return if b == open {
                scan_close(text, i, open, close)
            } else {
                scan_open(text, i, open, close)
            };
        }
        i = next_boundary(text, i);
    }
    None
}

/// Forward from `from` (exclusive) to the matching closing delimiter,
/// tracking nesting depth. Delimiters are ASCII, so the scan is byte-wise.
pub(crate) fn scan_close(text: &[u8], from: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in text.iter().enumerate().skip(from + 1) {
        if b == open {
            depth += 1;
        } else if b == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Backward from `from` (exclusive) to the matching opening delimiter.
pub(crate) fn scan_open(text: &[u8], from: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = from;
    while i > 0 {
        i -= 1;
        let b = text[i];
        if b == close {
            depth += 1;
        } else if b == open {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Scan forward on the current line for `ch`; `till` stops one code point
/// short of the match.
fn find_forward(text: &[u8], pos: usize, ch: char, till: bool) -> Option<usize> {
    let end = line_end(text, pos);
    let mut i = next_boundary(text, pos);
    while i < end {
        if char_at(text, i) == Some(ch) {
            return Some(if till { prev_boundary(text, i) } else { i });
        }
        i = next_boundary(text, i);
    }
    None
}

/// Scan backward on the current line for `ch`; `till` stops one code point
/// after the match.
fn find_backward(text: &[u8], pos: usize, ch: char, till: bool) -> Option<usize> {
    let start = line_start(text, pos);
    if pos <= start {
        return None;
    }
    let mut i = prev_boundary(text, pos);
    loop {
        if char_at(text, i) == Some(ch) {
            return Some(if till { next_boundary(text, i) } else { i });
        }
        if i <= start {
            return None;
        }
        i = prev_boundary(text, i);
    }
}
