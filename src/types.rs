use crate::registers::UNNAMED_REGISTER;

/// A half-open byte range `[start, end)` within a buffer.
///
/// Both endpoints are byte offsets and must lie on UTF-8 code-point
/// boundaries. A range may be empty (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The start offset (inclusive).
    pub start: usize,
    /// The end offset (exclusive).
    pub end: usize,
}

impl Range {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Build a normalized range from two offsets in either order.
    pub fn ordered(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The current mode of the engine.
///
/// Modal editing gives the same keys different meanings depending on the
/// active mode. Only the `Change` operator transitions mode from inside this
/// engine (`Normal` → `Insert`); every other transition is driven by the
/// host's key parser writing the field directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    VisualLine,
    VisualBlock,
    Command,
    Search,
}

/// An editing action applied to a range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Remove the range, saving it to the target register.
    Delete,
    /// Like `Delete`, then switch to insert mode.
    Change,
    /// Copy the range to the target register without touching the buffer.
    Yank,
    /// Reformat the covered lines. Formatting itself is the host's concern;
    /// the engine treats this as a no-op boundary.
    Format,
    /// Prepend one indent unit to each covered line.
    Indent,
    /// Strip one indent unit from each covered line.
    Outdent,
    /// Lowercase the covered lines (ASCII, length-preserving).
    Lowercase,
    /// Uppercase the covered lines (ASCII, length-preserving).
    Uppercase,
    /// Flip the case of each byte on the covered lines.
    ToggleCase,
}

/// A pure cursor-movement computation.
///
/// Motions never mutate anything; they map a position to a new position.
/// Counted motions apply the single-step motion repeatedly, each step
/// starting from the previous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Previous code point, clamped at the start of the buffer.
    Left,
    /// Next code point, clamped at the end of the buffer.
    Right,
    /// Same byte column on the previous line, clamped to its length.
    Up,
    /// Same byte column on the next line, clamped to its length.
    Down,

    /// Start of the next word (letters, digits, `_`, or a punctuation run).
    WordForward,
    /// Start of the previous word.
    WordBackward,
    /// Last character of the current or next word.
    WordEnd,
    /// Start of the next WORD (any run of non-whitespace).
    BigWordForward,
    /// Start of the previous WORD.
    BigWordBackward,
    /// Last character of the current or next WORD.
    BigWordEnd,

    /// First byte of the current line.
    LineStart,
    /// The line's terminating newline (or end of buffer).
    LineEnd,
    /// First non-whitespace character of the current line.
    LineFirstChar,

    /// Offset 0.
    FileStart,
    /// One past the last byte.
    FileEnd,

    /// Start of the next blank line.
    ParagraphForward,
    /// Start of the previous blank line.
    ParagraphBackward,
    /// Start of the next sentence (`.`/`!`/`?` followed by whitespace).
    SentenceForward,
    /// Start of the current or previous sentence.
    SentenceBackward,

    /// Partner of the bracket under (or after) the cursor on this line.
    MatchingBracket,

    /// Next occurrence of the argument character on this line.
    FindChar,
    /// Previous occurrence of the argument character on this line.
    FindCharBackward,
    /// One code point before the next occurrence.
    TillChar,
    /// One code point after the previous occurrence.
    TillCharBackward,
    /// Replay the most recent find/till motion.
    RepeatFind,
}

impl Motion {
    /// True for the motions that consume a character argument.
    pub const fn needs_char(self) -> bool {
        matches!(
            self,
            Self::FindChar | Self::FindCharBackward | Self::TillChar | Self::TillCharBackward
        )
    }
}

/// The structural span a text object selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Word,
    Sentence,
    Paragraph,
    /// `(` … `)`
    Paren,
    /// `[` … `]`
    Bracket,
    /// `{` … `}`
    Brace,
    /// `<` … `>`
    Angle,
    SingleQuote,
    DoubleQuote,
    Backtick,
    Tag,
}

/// Whether a text object excludes or includes its delimiters (or, for words,
/// the surrounding whitespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Inner,
    Around,
}

/// A semantic span resolved relative to the cursor, independent of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextObject {
    pub kind: ObjectKind,
    pub scope: Scope,
}

impl TextObject {
    pub const fn inner(kind: ObjectKind) -> Self {
        Self {
            kind,
            scope: Scope::Inner,
        }
    }

    pub const fn around(kind: ObjectKind) -> Self {
        Self {
            kind,
            scope: Scope::Around,
        }
    }
}

/// A fully-resolved editing command.
///
/// Produced by the host's key parser and consumed by
/// [`Engine::execute_command`](crate::Engine::execute_command). Exactly one
/// of `motion`/`text_object` is meaningful; an operator with neither is
/// rejected. A `count` of 0 means "unspecified" and is treated as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub operator: Option<Operator>,
    pub motion: Option<Motion>,
    pub text_object: Option<TextObject>,
    pub count: u32,
    pub register: char,
    pub char_arg: Option<char>,
}

impl Command {
    /// A bare motion: moves the cursor, no operator side effects.
    pub const fn bare(motion: Motion) -> Self {
        Self {
            operator: None,
            motion: Some(motion),
            text_object: None,
            count: 0,
            register: UNNAMED_REGISTER,
            char_arg: None,
        }
    }

    /// An operator applied over a motion's range.
    pub const fn operator(op: Operator, motion: Motion) -> Self {
        Self {
            operator: Some(op),
            motion: Some(motion),
            text_object: None,
            count: 0,
            register: UNNAMED_REGISTER,
            char_arg: None,
        }
    }

    /// An operator applied over a text object.
    pub const fn object(op: Operator, object: TextObject) -> Self {
        Self {
            operator: Some(op),
            motion: None,
            text_object: Some(object),
            count: 0,
            register: UNNAMED_REGISTER,
            char_arg: None,
        }
    }

    pub const fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub const fn register(mut self, name: char) -> Self {
        self.register = name;
        self
    }

    pub const fn char_arg(mut self, ch: char) -> Self {
        self.char_arg = Some(ch);
        self
    }
}
