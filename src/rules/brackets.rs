use crate::config::rules::FlowCollectionOptions;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::braces::{check_flow_collection, Delimiters};
use crate::rules::{Report, RuleContext, TokenRule};

const BRACKETS: Delimiters = Delimiters {
    open: TokenKind::FlowSequenceStart,
    close: TokenKind::FlowSequenceEnd,
    forbidden: "forbidden flow sequence",
    too_few: "too few spaces inside brackets",
    too_many: "too many spaces inside brackets",
    too_few_empty: "too few spaces inside empty brackets",
    too_many_empty: "too many spaces inside empty brackets",
};

pub struct Brackets {
    options: FlowCollectionOptions,
}

impl Brackets {
    pub fn new(options: FlowCollectionOptions) -> Self {
        Self { options }
    }
}

impl TokenRule for Brackets {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        check_flow_collection(&self.options, &BRACKETS, event, report);
    }
}
