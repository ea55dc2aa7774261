//! Thin layer over `libyaml-safer`. Nothing outside this file touches the
//! scanner crate directly.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use libyaml_safer::{EventData, Parser, Scanner, TokenData};

use super::types::{Line, Mark, ScalarStyle, SyntaxError, Token, TokenKind};

/// Upper bound on rescans after patching a flow-context colon.
const MAX_REPAIRS: usize = 64;

/// The text libyaml actually reads, with a map back to `source`.
///
/// `\r\n` becomes `\n`, the text always ends with a newline, and a `:`
/// directly followed by a flow indicator gets a space inserted after it.
/// Marks are rebuilt from source byte offsets, so none of this shows.
pub(crate) struct Input {
    text: String,
    /// Source offset of every byte of `text`, plus one for the end.
    origin: Vec<usize>,
}

impl Input {
    fn new(source: &str) -> Self {
        let mut text = String::with_capacity(source.len() + 1);
        let mut origin = Vec::with_capacity(source.len() + 2);
        let mut chars = source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c == '\r' && chars.peek().is_some_and(|&(_, next)| next == '\n') {
                // The break sits where the `\r` was, at the end of the line text.
                chars.next();
                text.push('\n');
                origin.push(i);
                continue;
            }
            text.push(c);
            origin.extend(i..i + c.len_utf8());
        }
        if !text.ends_with('\n') {
            text.push('\n');
            origin.push(source.len());
        }
        origin.push(source.len());
        Self { text, origin }
    }

    fn offset(&self, index: u64) -> usize {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.origin.get(i))
            .or(self.origin.last())
            .copied()
            .unwrap_or(0)
    }

    /// Converts a libyaml mark into a source position.
    fn mark(&self, mark: libyaml_safer::Mark, source: &str, lines: &[Line<'_>]) -> Mark {
        position(self.offset(mark.index), source, lines)
    }

    /// Where to insert a space so that a `:` libyaml rejected in flow
    /// context (`{a:}`, `[a:, b]`) reads as a value indicator.
    fn flow_colon(&self, err: &libyaml_safer::Error) -> Option<usize> {
        if err.problem() != "found unexpected ':'" {
            return None;
        }
        let at = usize::try_from(err.problem_mark()?.index).ok()?;
        let bytes = self.text.as_bytes();
        (bytes.get(at) == Some(&b':')
            && matches!(bytes.get(at + 1), Some(b',' | b'[' | b']' | b'{' | b'}')))
        .then_some(at + 1)
    }

    fn insert_space(&mut self, at: usize) {
        let Some(&offset) = self.origin.get(at) else {
            return;
        };
        self.text.insert(at, ' ');
        self.origin.insert(at, offset);
    }

    /// Runs the scanner, pushing tokens until stream end or the first
    /// failure.
    fn run_scanner(&self, source: &str, lines: &[Line<'_>], tokens: &mut Vec<Token>) -> Option<Stop> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut bytes = self.text.as_bytes();
            let mut scanner = Scanner::new();
            scanner.set_input_string(&mut bytes);
            loop {
                match Scanner::scan(&mut scanner) {
                    Ok(token) => {
                        let done = matches!(token.data, TokenData::StreamEnd);
                        tokens.push(self.convert_token(token, source, lines));
                        if done {
                            return None;
                        }
                    }
                    Err(err) => return Some(err),
                }
            }
        }));
        match outcome {
            Ok(error) => error.map(Stop::Error),
            Err(payload) => Some(Stop::Panic(panic_message(&*payload))),
        }
    }

    fn syntax_error(&self, stop: Stop, fallback: Mark, source: &str, lines: &[Line<'_>]) -> SyntaxError {
        match stop {
            Stop::Error(err) => SyntaxError {
                mark: err
                    .problem_mark()
                    .map_or(fallback, |m| self.mark(m, source, lines)),
                message: err.problem().to_string(),
            },
            Stop::Panic(reason) => {
                tracing::warn!("yaml scanner gave up: {reason}");
                SyntaxError {
                    mark: fallback,
                    message: "could not scan this input".to_string(),
                }
            }
        }
    }

    fn convert_token(&self, token: libyaml_safer::Token, source: &str, lines: &[Line<'_>]) -> Token {
        let libyaml_safer::Token {
            data,
            start_mark,
            end_mark,
            ..
        } = token;

        let (kind, value) = match data {
            TokenData::StreamStart { .. } => (TokenKind::StreamStart, None),
            TokenData::StreamEnd => (TokenKind::StreamEnd, None),
            TokenData::VersionDirective { .. } | TokenData::TagDirective { .. } => {
                (TokenKind::Directive, None)
            }
            TokenData::DocumentStart => (TokenKind::DocumentStart, None),
            TokenData::DocumentEnd => (TokenKind::DocumentEnd, None),
            TokenData::BlockSequenceStart => (TokenKind::BlockSequenceStart, None),
            TokenData::BlockMappingStart => (TokenKind::BlockMappingStart, None),
            TokenData::BlockEnd => (TokenKind::BlockEnd, None),
            TokenData::FlowSequenceStart => (TokenKind::FlowSequenceStart, None),
            TokenData::FlowSequenceEnd => (TokenKind::FlowSequenceEnd, None),
            TokenData::FlowMappingStart => (TokenKind::FlowMappingStart, None),
            TokenData::FlowMappingEnd => (TokenKind::FlowMappingEnd, None),
            TokenData::BlockEntry => (TokenKind::BlockEntry, None),
            TokenData::FlowEntry => (TokenKind::FlowEntry, None),
            TokenData::Key => (TokenKind::Key, None),
            TokenData::Value => (TokenKind::Value, None),
            TokenData::Alias { value } => (TokenKind::Alias, Some(value)),
            TokenData::Anchor { value } => (TokenKind::Anchor, Some(value)),
            TokenData::Tag { handle, suffix } => (TokenKind::Tag, Some(format!("{handle}{suffix}"))),
            TokenData::Scalar { value, style } => {
                (TokenKind::Scalar(convert_style(style)), Some(value))
            }
        };

        let (start, end) = if kind == TokenKind::StreamEnd {
            let end = position(source.len(), source, lines);
            (end, end)
        } else {
            (
                self.mark(start_mark, source, lines),
                self.mark(end_mark, source, lines),
            )
        };

        Token {
            kind,
            start,
            end,
            value,
            synthetic: false,
        }
    }
}

enum Stop {
    Error(libyaml_safer::Error),
    Panic(String),
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

pub(crate) struct Scan {
    pub tokens: Vec<Token>,
    pub error: Option<SyntaxError>,
    /// The (possibly patched) text the tokens came from.
    pub input: Input,
}

/// Tokenises `source`, stopping at the first scanner error.
pub(crate) fn scan(source: &str, lines: &[Line<'_>]) -> Scan {
    let mut input = Input::new(source);
    let mut repairs = 0;
    loop {
        let mut tokens = Vec::new();
        let stop = input.run_scanner(source, lines, &mut tokens);
        if let Some(Stop::Error(err)) = &stop {
            if repairs < MAX_REPAIRS {
                if let Some(at) = input.flow_colon(err) {
                    input.insert_space(at);
                    repairs += 1;
                    continue;
                }
            }
        }
        let fallback = tokens.last().map_or_else(Mark::default, |t| t.end);
        let error = stop.map(|stop| input.syntax_error(stop, fallback, source, lines));
        return Scan {
            tokens,
            error,
            input,
        };
    }
}

/// Runs the full parser over `input` and returns its first error. The
/// parser catches structural mistakes the scanner alone accepts, such as
/// an unterminated flow collection.
pub(crate) fn check_syntax(input: &Input, source: &str, lines: &[Line<'_>]) -> Option<SyntaxError> {
    let mut last = Mark::default();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut bytes = input.text.as_bytes();
        let mut parser = Parser::new();
        parser.set_input_string(&mut bytes);
        loop {
            match parser.parse() {
                Ok(event) => {
                    if matches!(event.data, EventData::StreamEnd) {
                        return None;
                    }
                    last = input.mark(event.end_mark, source, lines);
                }
                Err(err) => return Some(err),
            }
        }
    }));
    let stop = match outcome {
        Ok(error) => error.map(Stop::Error),
        Err(payload) => Some(Stop::Panic(panic_message(&*payload))),
    };
    stop.map(|stop| input.syntax_error(stop, last, source, lines))
}

fn convert_style(style: libyaml_safer::ScalarStyle) -> ScalarStyle {
    match style {
        libyaml_safer::ScalarStyle::SingleQuoted => ScalarStyle::SingleQuoted,
        libyaml_safer::ScalarStyle::DoubleQuoted => ScalarStyle::DoubleQuoted,
        libyaml_safer::ScalarStyle::Literal => ScalarStyle::Literal,
        libyaml_safer::ScalarStyle::Folded => ScalarStyle::Folded,
        _ => ScalarStyle::Plain,
    }
}

/// The mark of byte `index` of `source`: 0-based line from our own line
/// table and a column counted in characters.
pub(crate) fn position(index: usize, source: &str, lines: &[Line<'_>]) -> Mark {
    let index = index.min(source.len());
    let line = lines.partition_point(|l| l.start <= index).saturating_sub(1);
    let column = lines
        .get(line)
        .and_then(|l| source.get(l.start..index))
        .map_or(0, |before| before.chars().count());
    Mark {
        index,
        line,
        column,
    }
}
