//! Text objects — structural spans resolved relative to the cursor.
//!
//! Combined with operators, text objects form the second half of the modal
//! grammar: `delete` + `inner word`, `change` + `inner double-quote`,
//! `yank` + `around paren`. Each resolver returns the half-open byte range
//! `[start, end)` of the object, or [`EngineError::InvalidTextObject`] when
//! no enclosing object exists (unmatched bracket, no quote pair on the line).
//!
//! `Inner` excludes the object's delimiters; `Around` includes them — and,
//! for words, the surrounding whitespace (trailing if present, else leading).

use crate::error::EngineError;
use crate::motion::{
    char_at, class_at, line_end, line_start, next_boundary, prev_boundary, scan_close, scan_open,
    CharClass,
};
use crate::types::{ObjectKind, Range, Scope, TextObject};

/// Resolve a text object at `pos` to its byte range.
pub fn resolve(text: &[u8], pos: usize, object: TextObject) -> Result<Range, EngineError> {
    let range = match object.kind {
        ObjectKind::Word => word_object(text, pos, object.scope),
        ObjectKind::Sentence => sentence_object(text, pos, object.scope),
        ObjectKind::Paragraph => paragraph_object(text, pos, object.scope),
        ObjectKind::Paren => bracket_object(text, pos, b'(', b')', object.scope),
        ObjectKind::Bracket => bracket_object(text, pos, b'[', b']', object.scope),
        ObjectKind::Brace => bracket_object(text, pos, b'{', b'}', object.scope),
        ObjectKind::Angle => bracket_object(text, pos, b'<', b'>', object.scope),
        ObjectKind::SingleQuote => quote_object(text, pos, b'\'', object.scope),
        ObjectKind::DoubleQuote => quote_object(text, pos, b'"', object.scope),
        ObjectKind::Backtick => quote_object(text, pos, b'`', object.scope),
        ObjectKind::Tag => tag_object(text, pos, object.scope),
    };
    range.ok_or(EngineError::InvalidTextObject)
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

/// The run of same-class characters around the cursor. On whitespace, the
/// whitespace run (stopping at newlines). Around extends over trailing
/// whitespace, or leading when there is none; on whitespace it pulls in the
/// following word instead.
fn word_object(text: &[u8], pos: usize, scope: Scope) -> Option<Range> {
    let len = text.len();
    if pos >= len {
        return None;
    }
    if text[pos] == b'\n' {
        // An empty line is its own object: just the newline.
        return Some(Range::new(pos, pos + 1));
    }
    let cls = class_at(text, pos, false)?;

    let mut start = pos;
    while start > 0 {
        let p = prev_boundary(text, start);
        if class_at(text, p, false) != Some(cls) || text[p] == b'\n' {
            break;
        }
        start = p;
    }
    let mut end = next_boundary(text, pos);
    while end < len && class_at(text, end, false) == Some(cls) && text[end] != b'\n' {
        end = next_boundary(text, end);
    }

    if scope == Scope::Inner {
        return Some(Range::new(start, end));
    }

    match cls {
        CharClass::Blank => {
            // On whitespace: include the following word.
            let mut new_end = end;
            if let Some(next_cls) = class_at(text, new_end, false)
                && next_cls != CharClass::Blank
            {
                while new_end < len && class_at(text, new_end, false) == Some(next_cls) {
                    new_end = next_boundary(text, new_end);
                }
            }
            Some(Range::new(start, new_end))
        }
        CharClass::Word | CharClass::Punct => {
            // Trailing whitespace first, then leading, then bare.
            let mut new_end = end;
            while new_end < len
                && class_at(text, new_end, false) == Some(CharClass::Blank)
                && text[new_end] != b'\n'
            {
                new_end = next_boundary(text, new_end);
            }
            if new_end > end {
                return Some(Range::new(start, new_end));
            }
            let mut new_start = start;
            while new_start > 0 {
                let p = prev_boundary(text, new_start);
                if class_at(text, p, false) != Some(CharClass::Blank) || text[p] == b'\n' {
                    break;
                }
                new_start = p;
            }
            Some(Range::new(new_start, end))
        }
    }
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// The pair of unescaped `quote` characters on the cursor's line that
/// contains the cursor, or the next pair to its right. Quotes pair
/// left-to-right: 1st with 2nd, 3rd with 4th, and so on.
fn quote_object(text: &[u8], pos: usize, quote: u8, scope: Scope) -> Option<Range> {
    let start = line_start(text, pos);
    let end = line_end(text, pos);

    let mut quotes = Vec::new();
    let mut i = start;
    while i < end {
        if text[i] == quote && (i == start || text[i - 1] != b'\\') {
            quotes.push(i);
        }
        i = next_boundary(text, i);
    }

    let pair = quotes
        .chunks(2)
        .filter(|p| p.len() == 2)
        .find(|p| pos >= p[0] && pos <= p[1])
        .or_else(|| {
            quotes
                .chunks(2)
                .filter(|p| p.len() == 2)
                .find(|p| p[0] > pos)
        })?;

    Some(match scope {
        Scope::Inner => Range::new(pair[0] + 1, pair[1]),
        Scope::Around => Range::new(pair[0], pair[1] + 1),
    })
}

// ---------------------------------------------------------------------------
// Bracket pairs
// ---------------------------------------------------------------------------

/// The innermost matching delimiter pair enclosing the cursor. The scan
/// tracks nesting depth in both directions and works across lines. When the
/// cursor sits on a delimiter, that delimiter's own pair is selected.
fn bracket_object(text: &[u8], pos: usize, open: u8, close: u8, scope: Scope) -> Option<Range> {
    let len = text.len();
    if pos >= len {
        return None;
    }

    let (open_at, close_at) = if text[pos] == open {
        (pos, scan_close(text, pos, open, close)?)
    } else if text[pos] == close {
        (scan_open(text, pos, open, close)?, pos)
    } else {
        let o = scan_open(text, pos, open, close)?;
        let c = scan_close(text, o, open, close)?;
        if pos <= o || pos >= c {
            return None;
        }
        (o, c)
    };

    Some(match scope {
        Scope::Inner => Range::new(open_at + 1, close_at),
        Scope::Around => Range::new(open_at, close_at + 1),
    })
}

// ---------------------------------------------------------------------------
// Sentences and paragraphs
// ---------------------------------------------------------------------------

/// The sentence containing (or, from inter-sentence whitespace, following)
/// the cursor. Inner runs through the terminator; around adds trailing
/// spaces.
fn sentence_object(text: &[u8], pos: usize, scope: Scope) -> Option<Range> {
    let len = text.len();
    if len == 0 || pos >= len {
        return None;
    }

    let start = sentence_start(text, pos);

    let mut i = pos.max(start);
    let mut end = len;
    while i < len {
        if char_at(text, i).is_some_and(is_sentence_end) {
            end = next_boundary(text, i);
            break;
        }
        i = next_boundary(text, i);
    }

    if scope == Scope::Around {
        while end < len
            && char_at(text, end).is_some_and(|c| c.is_whitespace() && c != '\n')
        {
            end = next_boundary(text, end);
        }
    }
    Some(Range::new(start, end))
}

const fn is_sentence_end(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn sentence_start(text: &[u8], pos: usize) -> usize {
    let mut i = pos;
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

/// The run of non-blank lines containing the cursor (or the blank-line run,
/// when the cursor is on one). Around extends over the following blank lines
/// (or the following paragraph, from a blank line).
fn paragraph_object(text: &[u8], pos: usize, scope: Scope) -> Option<Range> {
    let len = text.len();
    if len == 0 || pos >= len {
        return None;
    }

    let cur_start = line_start(text, pos);
    let on_blank = line_end(text, pos) == cur_start;

    if on_blank {
        let mut start = cur_start;
        while start > 0 {
            let p = line_start(text, start - 1);
            if line_end(text, p) != p {
                break;
            }
            start = p;
        }
        let mut end = cur_start;
        while end < len && text[end] == b'\n' {
            end += 1;
        }
        if scope == Scope::Around {
            end = line_run_end(text, end);
        }
        return Some(Range::new(start, end));
    }

    let mut start = cur_start;
    while start > 0 {
        let p = line_start(text, start - 1);
        if text[p] == b'\n' {
            break; // previous line is blank
        }
        start = p;
    }
    let mut end = line_run_end(text, cur_start);
    if scope == Scope::Around {
        while end < len && text[end] == b'\n' {
            end += 1;
        }
    }
    Some(Range::new(start, end))
}

/// End of the run of non-blank lines starting at `from`: the start of the
/// next blank line, or the end of the buffer.
fn line_run_end(text: &[u8], from: usize) -> usize {
    let len = text.len();
    let mut start = from;
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

// ---------------------------------------------------------------------------
// Markup tags
// ---------------------------------------------------------------------------

struct OpenTag {
    name_start: usize,
    name_end: usize,
    /// Offset just past the `>`.
    end: usize,
}

/// The nearest enclosing `<name …>` / `</name>` pair, tracking nesting of
/// same-name tags. Self-closing tags and `<!…>` declarations never match.
fn tag_object(text: &[u8], pos: usize, scope: Scope) -> Option<Range> {
    let len = text.len();
    if len == 0 || pos >= len {
        return None;
    }

    // Walk candidate open tags backward from the cursor; the first whose
    // matching close spans the cursor is the innermost enclosing tag.
    let mut i = pos + 1;
    while i > 0 {
        i -= 1;
        if text[i] != b'<' {
            continue;
        }
        let Some(open) = parse_open_tag(text, i) else {
            continue;
        };
        let name = &text[open.name_start..open.name_end];
        let Some((close_start, close_end)) = find_matching_close(text, open.end, name) else {
            continue;
        };
        if pos < close_end {
            return Some(match scope {
                Scope::Inner => Range::new(open.end, close_start),
                Scope::Around => Range::new(i, close_end),
            });
        }
    }
    None
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Parse an opening tag at `at` (which must hold `<`). Rejects close tags,
/// declarations, and self-closing tags.
fn parse_open_tag(text: &[u8], at: usize) -> Option<OpenTag> {
    let len = text.len();
    let mut i = at + 1;
    if i >= len || text[i] == b'/' || text[i] == b'!' {
        return None;
    }
    let name_start = i;
    while i < len && is_tag_name_byte(text[i]) {
        i += 1;
    }
    if i == name_start {
        return None;
    }
    let name_end = i;
    while i < len && text[i] != b'>' {
        i += 1;
    }
    if i >= len || text[i - 1] == b'/' {
        return None;
    }
    Some(OpenTag {
        name_start,
        name_end,
        end: i + 1,
    })
}

/// Find the close tag matching `name`, counting nested same-name opens.
/// Returns `(close_start, close_end)` spanning `</name>`.
fn find_matching_close(text: &[u8], from: usize, name: &[u8]) -> Option<(usize, usize)> {
    let len = text.len();
    let mut depth = 0usize;
    let mut i = from;
    while i < len {
        if text[i] != b'<' {
            i += 1;
            continue;
        }
        if i + 1 < len && text[i + 1] == b'/' {
            let name_start = i + 2;
            let mut j = name_start;
            while j < len && is_tag_name_byte(text[j]) {
                j += 1;
            }
            let matches_name = &text[name_start..j] == name;
            while j < len && text[j] != b'>' {
                j += 1;
            }
            if j >= len {
                return None;
            }
            if matches_name {
                if depth == 0 {
                    return Some((i, j + 1));
                }
                depth -= 1;
            }
            i = j + 1;
            continue;
        }
        if let Some(open) = parse_open_tag(text, i) {
            if &text[open.name_start..open.name_end] == name {
                depth += 1;
            }
            i = open.end;
            continue;
        }
        i += 1;
    }
    None
}
