use super::types::{Mark, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Open {
    BlockMapping,
    BlockSequence,
    /// A sequence whose dashes sit at its parent key's column. The scanner
    /// reports neither its start nor its end.
    Indentless,
    FlowMapping,
    FlowSequence,
}

/// Inserts the `BlockSequenceStart` / `BlockEnd` pair the scanner leaves
/// out around indentless block sequences, so every start has a matching end.
///
/// At most one real token is held back while a synthetic one is emitted.
pub(crate) struct SequenceRecovery<I> {
    tokens: I,
    pending: Option<Token>,
    open: Vec<Open>,
}

impl<I: Iterator<Item = Token>> SequenceRecovery<I> {
    pub(crate) fn new(tokens: I) -> Self {
        Self {
            tokens,
            pending: None,
            open: Vec::new(),
        }
    }

    fn track(&mut self, kind: TokenKind) {
        let top = self.open.last().copied();
        match kind {
            TokenKind::BlockMappingStart => self.open.push(Open::BlockMapping),
            TokenKind::BlockSequenceStart => self.open.push(Open::BlockSequence),
            TokenKind::FlowMappingStart => self.open.push(Open::FlowMapping),
            TokenKind::FlowSequenceStart => self.open.push(Open::FlowSequence),
            TokenKind::BlockEnd if matches!(top, Some(Open::BlockMapping | Open::BlockSequence)) => {
                self.open.pop();
            }
            TokenKind::FlowMappingEnd if top == Some(Open::FlowMapping) => {
                self.open.pop();
            }
            TokenKind::FlowSequenceEnd if top == Some(Open::FlowSequence) => {
                self.open.pop();
            }
            _ => {}
        }
    }
}

fn closes_indentless(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Key
            | TokenKind::Value
            | TokenKind::BlockEnd
            | TokenKind::FlowMappingEnd
            | TokenKind::FlowSequenceEnd
            | TokenKind::DocumentStart
            | TokenKind::DocumentEnd
            | TokenKind::StreamEnd
    )
}

fn synthetic(kind: TokenKind, at: Mark) -> Token {
    Token {
        kind,
        start: at,
        end: at,
        value: None,
        synthetic: true,
    }
}

impl<I: Iterator<Item = Token>> Iterator for SequenceRecovery<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.pending.take().or_else(|| self.tokens.next())?;
        let top = self.open.last().copied();

        if top == Some(Open::Indentless) && closes_indentless(token.kind) {
            self.open.pop();
            let end = synthetic(TokenKind::BlockEnd, token.start);
            self.pending = Some(token);
            return Some(end);
        }

        if token.kind == TokenKind::BlockEntry
            && !matches!(top, Some(Open::BlockSequence | Open::Indentless))
        {
            self.open.push(Open::Indentless);
            let start = synthetic(TokenKind::BlockSequenceStart, token.start);
            self.pending = Some(token);
            return Some(start);
        }

        self.track(token.kind);
        Some(token)
    }
}
