use crate::config::rules::EmptyValuesOptions;
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::{Report, RuleContext, TokenRule};

pub struct EmptyValues {
    options: EmptyValuesOptions,
}

impl EmptyValues {
    pub fn new(options: EmptyValuesOptions) -> Self {
        Self { options }
    }
}

impl TokenRule for EmptyValues {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        let Some(next) = event.next_kind() else {
            return;
        };
        let line = token.start.line + 1;
        let column = token.end.column + 1;

        match token.kind {
            TokenKind::Value => {
                if self.options.forbid_in_block_mappings
                    && matches!(next, TokenKind::Key | TokenKind::BlockEnd)
                {
                    emit!(report, line, column, "empty value in block mapping");
                }
                if self.options.forbid_in_flow_mappings
                    && matches!(next, TokenKind::FlowEntry | TokenKind::FlowMappingEnd)
                {
                    emit!(report, line, column, "empty value in flow mapping");
                }
            }
            TokenKind::BlockEntry
                if self.options.forbid_in_block_sequences
                    && matches!(
                        next,
                        TokenKind::Key | TokenKind::BlockEnd | TokenKind::BlockEntry
                    ) =>
            {
                emit!(report, line, column, "empty value in block sequence");
            }
            _ => {}
        }
    }
}
