//! Operator execution — applying an editing action to a normalized range.
//!
//! Delete, change, and yank are character-wise over the exact range; the
//! remaining operators are contracted to cover the whole lines the range
//! touches. `text` is the snapshot the range was resolved against; all
//! geometry is computed from it before the first mutation.

use tracing::trace;

use crate::error::EngineError;
use crate::motion::{line_end, line_start};
use crate::registers::RegisterStore;
use crate::traits::TextBuffer;
use crate::types::{Mode, Operator, Range};

pub(crate) struct Outcome {
    pub cursor: usize,
    pub mode: Option<Mode>,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn apply<B: TextBuffer>(
    op: Operator,
    buf: &mut B,
    text: &[u8],
    range: Range,
    register: char,
    registers: &mut RegisterStore,
    indent_unit: &str,
    cursor: usize,
) -> Result<Outcome, EngineError> {
    match op {
        Operator::Delete => {
            let yanked = buf.slice(range)?.into_owned();
            registers.write(register, yanked);
            buf.delete(range.start, range.len())?;
            Ok(Outcome {
                cursor: range.start,
                mode: None,
            })
        }
        Operator::Change => {
            let yanked = buf.slice(range)?.into_owned();
            registers.write(register, yanked);
            buf.delete(range.start, range.len())?;
            Ok(Outcome {
                cursor: range.start,
                mode: Some(Mode::Insert),
            })
        }
        Operator::Yank => {
            let yanked = buf.slice(range)?.into_owned();
            trace!(register = %register, bytes = yanked.len(), "yank");
            registers.write(register, yanked);
            Ok(Outcome { cursor, mode: None })
        }
        Operator::Indent => reindent(buf, text, range, indent_unit, true),
        Operator::Outdent => reindent(buf, text, range, indent_unit, false),
        Operator::Lowercase | Operator::Uppercase | Operator::ToggleCase => {
            recase(buf, text, range, op, cursor)
        }
        // Formatting is deferred to the host's formatter collaborator.
        Operator::Format => Ok(Outcome { cursor, mode: None }),
    }
}

/// Expand a range to the whole lines it touches: line start of `start`
/// through line end of `end` (exclusive of the trailing newline).
fn line_span(text: &[u8], range: Range) -> Range {
    Range::new(line_start(text, range.start), line_end(text, range.end))
}

/// Byte offsets of every line start inside `span`.
fn line_starts(text: &[u8], span: Range) -> Vec<usize> {
    let mut starts = vec![span.start];
    let mut i = span.start;
    while i < span.end {
        if text[i] == b'\n' {
            starts.push(i + 1);
        }
        i += 1;
    }
    starts
}

fn reindent<B: TextBuffer>(
    buf: &mut B,
    text: &[u8],
    range: Range,
    unit: &str,
    add: bool,
) -> Result<Outcome, EngineError> {
    let span = line_span(text, range);
    let starts = line_starts(text, span);
    trace!(lines = starts.len(), add, "reindent");

    // Back to front so earlier offsets stay valid.
    for &start in starts.iter().rev() {
        // Blank lines are left alone.
        if start >= text.len() || text[start] == b'\n' {
            continue;
        }
        if add {
            buf.insert(start, unit.as_bytes())?;
        } else {
            let width = outdent_width(&text[start..], unit);
            if width > 0 {
                buf.delete(start, width)?;
            }
        }
    }
    Ok(Outcome {
        cursor: span.start,
        mode: None,
    })
}

/// How many leading bytes to strip: a full indent unit, a single tab, or
/// whatever shorter run of spaces is present.
fn outdent_width(line: &[u8], unit: &str) -> usize {
    if line.starts_with(unit.as_bytes()) {
        return unit.len();
    }
    if line.first() == Some(&b'\t') {
        return 1;
    }
    line.iter()
        .take(unit.len())
        .take_while(|&&b| b == b' ')
        .count()
}

/// Rewrite ASCII case per byte over the covered lines. Length-preserving:
/// non-ASCII bytes pass through untouched.
fn recase<B: TextBuffer>(
    buf: &mut B,
    text: &[u8],
    range: Range,
    op: Operator,
    cursor: usize,
) -> Result<Outcome, EngineError> {
    let span = line_span(text, range);
    if span.is_empty() {
        return Ok(Outcome { cursor, mode: None });
    }

    let mut bytes = text[span.start..span.end].to_vec();
    for b in &mut bytes {
        *b = match op {
            Operator::Lowercase => b.to_ascii_lowercase(),
            Operator::Uppercase => b.to_ascii_uppercase(),
            Operator::ToggleCase => {
                if b.is_ascii_uppercase() {
                    b.to_ascii_lowercase()
                } else {
                    b.to_ascii_uppercase()
                }
            }
            _ => *b,
        };
    }

    buf.delete(span.start, span.len())?;
    buf.insert(span.start, &bytes)?;
    Ok(Outcome { cursor, mode: None })
}
