use std::fmt;

use crate::config::rules::{IndentSequences, IndentSpaces, IndentationOptions};
use crate::emit;
use crate::parser::types::{ScalarStyle, Token, TokenEvent, TokenKind};
use crate::rules::utils::is_explicit_key;
use crate::rules::{Report, RuleContext, TokenRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    BlockMap,
    FlowMap,
    BlockSeq,
    FlowSeq,
    BlockEntry,
    Key,
    Value,
}

impl FrameKind {
    fn label(self) -> &'static str {
        match self {
            FrameKind::Root => "ROOT",
            FrameKind::BlockMap => "B_MAP",
            FrameKind::FlowMap => "F_MAP",
            FrameKind::BlockSeq => "B_SEQ",
            FrameKind::FlowSeq => "F_SEQ",
            FrameKind::BlockEntry => "B_ENT",
            FrameKind::Key => "KEY",
            FrameKind::Value => "VAL",
        }
    }
}

/// One level of nesting and the column its content must start at.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    /// May be negative while the indent width is still unknown.
    indent: isize,
    /// Indentation of the line a flow collection was opened on.
    line_indent: isize,
    explicit_key: bool,
}

const ROOT: Frame = Frame::new(FrameKind::Root, 0);

impl Frame {
    const fn new(kind: FrameKind, indent: isize) -> Self {
        Self {
            kind,
            indent,
            line_indent: 0,
            explicit_key: false,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.label(), self.indent)
    }
}

/// The token stream does not have the shape the stack model expects.
#[derive(Debug)]
struct Unexpected;

fn ensure(condition: bool) -> Result<(), Unexpected> {
    if condition {
        Ok(())
    } else {
        Err(Unexpected)
    }
}

fn column(token: &Token) -> isize {
    token.start.column as isize
}

fn is_visible(token: &Token) -> bool {
    !matches!(
        token.kind,
        TokenKind::StreamStart | TokenKind::StreamEnd | TokenKind::BlockEnd
    ) && !(token.is_scalar() && token.value().is_empty())
}

/// 1-based line a token really ends on: trailing line breaks a scalar
/// swallowed belong to the lines after it.
fn real_end_line(token: &Token, source: &str) -> usize {
    let end_line = token.end.line + 1;
    if !token.is_scalar() {
        return end_line;
    }
    let from = token.start.index.saturating_sub(1);
    let breaks = source
        .as_bytes()
        .get(from..token.end.index)
        .unwrap_or_default()
        .iter()
        .rev()
        .take_while(|&&b| b" \t\n\r\x0b\x0c".contains(&b))
        .filter(|&&b| b == b'\n')
        .count();
    end_line.saturating_sub(breaks)
}

#[derive(Debug, Default)]
struct IndentState {
    stack: Vec<Frame>,
    /// Last line (1-based) covered by a visible token.
    cur_line: usize,
    cur_line_indent: isize,
    /// Indent width; `None` until a `consistent` document reveals it.
    spaces: Option<isize>,
    /// What a `consistent` sequence policy locked onto.
    locked_sequences: Option<IndentSequences>,
    /// An under-indentation was reported and no line has been right since.
    broken: bool,
}

impl IndentState {
    fn top(&self) -> Frame {
        self.stack.last().copied().unwrap_or(ROOT)
    }

    fn parent(&self) -> Result<Frame, Unexpected> {
        let index = self.stack.len().checked_sub(2).ok_or(Unexpected)?;
        Ok(self.stack[index])
    }

    fn detect_indent(&mut self, base: isize, found: isize) -> isize {
        base + *self.spaces.get_or_insert(found - base)
    }

    fn step(
        &mut self,
        event: &TokenEvent<'_>,
        options: &IndentationOptions,
        report: &mut Report,
    ) -> Result<(), Unexpected> {
        if self.stack.is_empty() {
            self.stack.push(ROOT);
            self.spaces = match options.spaces {
                IndentSpaces::Fixed(n) => Some(n as isize),
                IndentSpaces::Consistent => None,
            };
        }

        let token = event.curr;
        let visible = is_visible(token);
        let first_in_line = visible && token.start.line + 1 > self.cur_line;

        if first_in_line {
            let top = self.top();
            let expected = match token.kind {
                TokenKind::FlowMappingEnd | TokenKind::FlowSequenceEnd => top.line_indent,
                TokenKind::Value => top.indent,
                _ if top.kind == FrameKind::Key && top.explicit_key => {
                    self.detect_indent(top.indent, column(token))
                }
                _ => top.indent,
            };
            self.judge(token, expected, report);
        }

        if options.check_multi_line_strings && token.is_scalar() {
            self.check_scalar(token, event.source, report)?;
        }

        if visible {
            self.cur_line = real_end_line(token, event.source);
            if first_in_line {
                self.cur_line_indent = column(token);
            }
        }

        self.push(event, options.indent_sequences)?;
        self.pop(event)
    }

    fn judge(&mut self, token: &Token, expected: isize, report: &mut Report) {
        let found = column(token);
        let line = token.start.line + 1;
        let col = token.start.column + 1;
        if found == expected {
            self.broken = false;
        } else if expected < 0 {
            emit!(report, line, col, "wrong indentation: expected at least {}", found + 1);
            self.broken = false;
        } else if found < expected {
            if !self.broken {
                report.push_syntax(
                    line,
                    col,
                    format!("wrong indentation: expected {expected} but found {found}"),
                );
            }
            self.broken = true;
        } else {
            emit!(report, line, col, "wrong indentation: expected {expected} but found {found}");
            self.broken = false;
        }
    }

    fn push(&mut self, event: &TokenEvent<'_>, sequences: IndentSequences) -> Result<(), Unexpected> {
        let token = event.curr;
        // A stream cut short by a syntax error has nothing left to indent.
        let Some(next) = event.next else {
            return Ok(());
        };
        match token.kind {
            TokenKind::BlockMappingStart => {
                ensure(next.kind == TokenKind::Key && next.start.line == token.start.line)?;
                self.stack.push(Frame::new(FrameKind::BlockMap, column(token)));
            }
            TokenKind::BlockSequenceStart => {
                ensure(next.kind == TokenKind::BlockEntry && next.start.line == token.start.line)?;
                self.stack.push(Frame::new(FrameKind::BlockSeq, column(token)));
            }
            TokenKind::FlowMappingStart | TokenKind::FlowSequenceStart => {
                let indent = if next.start.line == token.start.line {
                    column(next)
                } else {
                    self.detect_indent(self.cur_line_indent, column(next))
                };
                let kind = if token.kind == TokenKind::FlowMappingStart {
                    FrameKind::FlowMap
                } else {
                    FrameKind::FlowSeq
                };
                self.stack.push(Frame {
                    line_indent: self.cur_line_indent,
                    ..Frame::new(kind, indent)
                });
            }
            TokenKind::BlockEntry => {
                // An empty entry opens nothing.
                if matches!(next.kind, TokenKind::BlockEntry | TokenKind::BlockEnd) {
                    return Ok(());
                }
                let indent = if next.start.line == token.end.line
                    || next.start.column == token.start.column
                {
                    column(next)
                } else {
                    self.detect_indent(column(token), column(next))
                };
                self.stack.push(Frame::new(FrameKind::BlockEntry, indent));
            }
            TokenKind::Key => {
                self.stack.push(Frame {
                    explicit_key: is_explicit_key(token, event.source),
                    ..Frame::new(FrameKind::Key, self.top().indent)
                });
            }
            TokenKind::Value => self.push_value(event, sequences)?,
            _ => {}
        }
        Ok(())
    }

    fn push_value(&mut self, event: &TokenEvent<'_>, sequences: IndentSequences) -> Result<(), Unexpected> {
        let key = self.top();
        ensure(key.kind == FrameKind::Key)?;
        let mut next = event.next.ok_or(Unexpected)?;
        let prev = event.prev.ok_or(Unexpected)?;

        // `key: &anchor` or `key: !tag` with the content on the next line.
        if matches!(next.kind, TokenKind::Anchor | TokenKind::Tag)
            && next.start.line == prev.start.line
        {
            if let Some(after) = event.next_next.filter(|t| next.start.line < t.start.line) {
                next = after;
            }
        }

        if matches!(
            next.kind,
            TokenKind::BlockEnd | TokenKind::FlowMappingEnd | TokenKind::FlowSequenceEnd | TokenKind::Key
        ) {
            return Ok(());
        }

        let indent = if key.explicit_key {
            self.detect_indent(key.indent, column(next))
        } else if next.start.line == prev.start.line {
            column(next)
        } else if matches!(next.kind, TokenKind::BlockSequenceStart | TokenKind::BlockEntry) {
            self.sequence_indent(key.indent, column(next), sequences)
        } else {
            self.detect_indent(key.indent, column(next))
        };
        self.stack.push(Frame::new(FrameKind::Value, indent));
        Ok(())
    }

    fn sequence_indent(&mut self, base: isize, found: isize, configured: IndentSequences) -> isize {
        match self.locked_sequences.unwrap_or(configured) {
            IndentSequences::No => base,
            // Unknown width and a flush sequence: no expectation can be
            // formed yet.
            IndentSequences::Yes if self.spaces.is_none() && found == base => -1,
            IndentSequences::Yes => self.detect_indent(base, found),
            policy @ (IndentSequences::Whatever | IndentSequences::Consistent) => {
                let indented = found != base;
                if policy == IndentSequences::Consistent {
                    self.locked_sequences = Some(if indented {
                        IndentSequences::Yes
                    } else {
                        IndentSequences::No
                    });
                }
                if indented {
                    self.detect_indent(base, found)
                } else {
                    base
                }
            }
        }
    }

    fn pop(&mut self, event: &TokenEvent<'_>) -> Result<(), Unexpected> {
        let kind = event.curr.kind;
        let next = event.next_kind();
        let mut consumed = false;
        loop {
            match self.top().kind {
                FrameKind::FlowSeq if kind == TokenKind::FlowSequenceEnd && !consumed => {
                    self.stack.pop();
                    consumed = true;
                }
                FrameKind::FlowMap if kind == TokenKind::FlowMappingEnd && !consumed => {
                    self.stack.pop();
                    consumed = true;
                }
                FrameKind::BlockMap | FrameKind::BlockSeq
                    if kind == TokenKind::BlockEnd && !consumed =>
                {
                    self.stack.pop();
                    consumed = true;
                }
                FrameKind::BlockEntry
                    if matches!(next, Some(TokenKind::BlockEntry | TokenKind::BlockEnd)) =>
                {
                    self.stack.pop();
                }
                FrameKind::Value
                    if !matches!(kind, TokenKind::Value | TokenKind::Anchor | TokenKind::Tag) =>
                {
                    ensure(self.parent()?.kind == FrameKind::Key)?;
                    self.stack.truncate(self.stack.len() - 2);
                }
                // A key with no value, as in a set.
                FrameKind::Key
                    if matches!(
                        next,
                        Some(
                            TokenKind::BlockEnd
                                | TokenKind::FlowMappingEnd
                                | TokenKind::FlowSequenceEnd
                                | TokenKind::Key
                        )
                    ) =>
                {
                    self.stack.pop();
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Continuation lines of a multi-line scalar.
    fn check_scalar(&mut self, token: &Token, source: &str, report: &mut Report) -> Result<(), Unexpected> {
        if token.start.line == token.end.line {
            return Ok(());
        }
        let bytes = source.as_bytes();
        let end = token.end.index.saturating_sub(1);
        let mut expected = None;
        let mut line = token.start.line + 1;
        let mut line_start = token.start.index;
        while let Some(offset) = bytes
            .get(line_start..end)
            .and_then(|s| s.iter().position(|&b| b == b'\n'))
        {
            line_start += offset + 1;
            line += 1;
            let indent = bytes[line_start..].iter().take_while(|&&b| b == b' ').count();
            if matches!(bytes.get(line_start + indent), None | Some(b'\n' | b'\r')) {
                continue;
            }
            let want = match expected {
                Some(e) => e,
                None => {
                    let e = self.scalar_indent(token, indent as isize)?;
                    expected = Some(e);
                    e
                }
            };
            if indent as isize != want {
                emit!(
                    report,
                    line,
                    indent + 1,
                    "wrong indentation: expected {want} but found {indent}"
                );
            }
        }
        Ok(())
    }

    fn scalar_indent(&mut self, token: &Token, found: isize) -> Result<isize, Unexpected> {
        let col = column(token);
        match token.kind {
            TokenKind::Scalar(ScalarStyle::Plain) => Ok(col),
            TokenKind::Scalar(ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted) => Ok(col + 1),
            _ => {
                let top = self.top();
                let base = match top.kind {
                    FrameKind::BlockEntry => col,
                    FrameKind::Key => {
                        ensure(top.explicit_key)?;
                        col
                    }
                    FrameKind::Value => {
                        let key = self.parent()?;
                        if token.start.line + 1 > self.cur_line {
                            top.indent
                        } else if key.explicit_key {
                            col
                        } else {
                            key.indent
                        }
                    }
                    _ => top.indent,
                };
                Ok(self.detect_indent(base, found))
            }
        }
    }
}

pub struct Indentation {
    options: IndentationOptions,
}

impl Indentation {
    pub fn new(options: IndentationOptions) -> Self {
        Self { options }
    }
}

impl TokenRule for Indentation {
    fn check(&self, event: &TokenEvent<'_>, context: &mut RuleContext, report: &mut Report) {
        let state = context.state::<IndentState>();
        if state.step(event, &self.options, report).is_err() {
            let token = event.curr;
            emit!(
                report,
                token.start.line + 1,
                token.start.column + 1,
                "cannot infer indentation: unexpected token"
            );
        }
    }
}
