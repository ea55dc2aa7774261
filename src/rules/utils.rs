use crate::config::rules::Spacing;
use crate::parser::types::{Token, TokenEvent, TokenKind};
use crate::rules::Report;

/// Bounds on the run of spaces between two tokens on one line.
#[derive(Debug, Clone, Copy)]
pub struct SpacingCheck {
    pub min: Spacing,
    pub max: Spacing,
    pub too_few: &'static str,
    pub too_many: &'static str,
}

impl SpacingCheck {
    pub fn max_only(max: Spacing, too_many: &'static str) -> Self {
        Self {
            min: Spacing(None),
            max,
            too_few: "",
            too_many,
        }
    }

    /// Checks the spaces between `token` and the following `next`.
    pub fn after(&self, token: &Token, next: Option<&Token>, report: &mut Report) {
        let Some(next) = next else {
            return;
        };
        if token.end.line != next.start.line {
            return;
        }
        let spaces = next.start.column.saturating_sub(token.end.column);
        self.judge(spaces, token.start.line + 1, next.start.column, report);
    }

    /// Checks the spaces between the preceding `prev` and `token`.
    pub fn before(&self, prev: Option<&Token>, token: &Token, report: &mut Report) {
        let Some(prev) = prev else {
            return;
        };
        // A token ending at column 0 swallowed the previous line break.
        if prev.end.line != token.start.line || (prev.end.column == 0 && prev.end.index > 0) {
            return;
        }
        let spaces = token.start.column.saturating_sub(prev.end.column);
        self.judge(spaces, token.start.line + 1, token.start.column, report);
    }

    /// `column` is the 0-based column of the token that closes the gap.
    fn judge(&self, spaces: usize, line: usize, column: usize, report: &mut Report) {
        if self.max.0.is_some_and(|max| spaces > max) {
            report.push(line, column, self.too_many.to_string());
        } else if self.min.0.is_some_and(|min| spaces < min) {
            report.push(line, column + 1, self.too_few.to_string());
        }
    }
}

/// Open collections and the keys seen so far in each mapping.
#[derive(Debug, Default)]
pub struct KeyStack {
    collections: Vec<Option<Vec<String>>>,
}

impl KeyStack {
    /// Tracks collection boundaries. Returns the key scalar when `event`
    /// is a key of the innermost mapping, together with that mapping's
    /// keys so far.
    pub fn track<'e>(&mut self, event: &TokenEvent<'e>) -> Option<(&'e Token, &mut Vec<String>)> {
        match event.curr.kind {
            TokenKind::BlockMappingStart | TokenKind::FlowMappingStart => {
                self.collections.push(Some(Vec::new()));
            }
            TokenKind::BlockSequenceStart | TokenKind::FlowSequenceStart => {
                self.collections.push(None);
            }
            TokenKind::BlockEnd | TokenKind::FlowMappingEnd | TokenKind::FlowSequenceEnd => {
                self.collections.pop();
            }
            // Flow sequences may hold single-pair mappings without braces.
            TokenKind::Key => {
                let next = event.next.filter(|t| t.is_scalar())?;
                let keys = self.collections.last_mut()?.as_mut()?;
                return Some((next, keys));
            }
            _ => {}
        }
        None
    }
}

/// A `?` key indicator, as opposed to the zero-width key of `a: b`.
pub fn is_explicit_key(token: &Token, source: &str) -> bool {
    token.kind == TokenKind::Key
        && token.start.index < token.end.index
        && source.as_bytes().get(token.start.index) == Some(&b'?')
}
