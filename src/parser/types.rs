/// A position in the source. All fields are 0-based; `index` is a byte
/// offset and `column` counts characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    StreamStart,
    StreamEnd,
    Directive,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Alias,
    Anchor,
    Tag,
    Scalar(ScalarStyle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Mark,
    pub end: Mark,
    /// Scalar text, anchor/alias name or tag.
    pub value: Option<String>,
    /// Inserted by the builder rather than reported by the scanner.
    pub synthetic: bool,
}

impl Token {
    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TokenKind::Scalar(_))
    }

    pub fn is_plain_scalar(&self) -> bool {
        self.kind == TokenKind::Scalar(ScalarStyle::Plain)
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

/// A token together with its neighbours in the (repaired) token stream.
#[derive(Debug, Clone, Copy)]
pub struct TokenEvent<'a> {
    pub source: &'a str,
    pub curr: &'a Token,
    pub prev: Option<&'a Token>,
    pub next: Option<&'a Token>,
    pub next_next: Option<&'a Token>,
}

impl TokenEvent<'_> {
    pub fn next_kind(&self) -> Option<TokenKind> {
        self.next.map(|t| t.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based.
    pub number: usize,
    pub start: usize,
    /// Excludes the line terminator.
    pub end: usize,
    pub text: &'a str,
    /// False only for a final segment with no trailing newline.
    pub terminated: bool,
}

/// The comment immediately preceding another one inside the same gap
/// between two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecedingComment {
    pub column: usize,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment<'a> {
    /// 1-based.
    pub line: usize,
    /// 1-based column of the `#`.
    pub column: usize,
    /// Byte offset of the `#`.
    pub index: usize,
    /// Text after the `#`, without the line terminator.
    pub text: &'a str,
    /// Content precedes the comment on its line.
    pub inline: bool,
    /// Only block ends and the end of stream follow the comment.
    pub end_of_document: bool,
    /// End of the token before the comment; `None` at stream start.
    pub token_before_end: Option<Mark>,
    /// Indentation of the line the token before the comment starts on.
    pub token_before_line_indent: usize,
    /// 0-based column of the token after the comment.
    pub token_after_column: usize,
    pub comment_before: Option<PrecedingComment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub mark: Mark,
    pub message: String,
}

/// Lines, comments and repaired tokens of one source text.
#[derive(Debug)]
pub struct Document<'a> {
    pub source: &'a str,
    pub lines: Vec<Line<'a>>,
    pub comments: Vec<Comment<'a>>,
    pub tokens: Vec<Token>,
    pub syntax_error: Option<SyntaxError>,
}

impl<'a> Document<'a> {
    pub fn events(&self) -> impl Iterator<Item = TokenEvent<'_>> {
        let tokens = &self.tokens;
        tokens.iter().enumerate().map(move |(i, curr)| TokenEvent {
            source: self.source,
            curr,
            prev: i.checked_sub(1).map(|p| &tokens[p]),
            next: tokens.get(i + 1),
            next_next: tokens.get(i + 2),
        })
    }
}
