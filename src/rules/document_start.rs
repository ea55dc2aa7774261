use crate::config::rules::DocumentStartOptions;
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::{Report, RuleContext, TokenRule};

pub struct DocumentStart {
    present: bool,
}

impl DocumentStart {
    pub fn new(options: DocumentStartOptions) -> Self {
        Self {
            present: options.present,
        }
    }
}

impl TokenRule for DocumentStart {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        if self.present {
            let starts_document = event.prev.is_some_and(|p| {
                matches!(
                    p.kind,
                    TokenKind::StreamStart | TokenKind::DocumentEnd | TokenKind::Directive
                )
            });
            let is_marker = matches!(
                token.kind,
                TokenKind::DocumentStart | TokenKind::Directive | TokenKind::StreamEnd
            );
            if starts_document && !is_marker {
                emit!(report, token.start.line + 1, 1, "missing document start \"---\"");
            }
        } else if token.kind == TokenKind::DocumentStart {
            emit!(
                report,
                token.start.line + 1,
                token.start.column + 1,
                "found forbidden document start \"---\""
            );
        }
    }
}
