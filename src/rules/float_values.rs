use regex::Regex;
use std::sync::LazyLock;

use crate::config::rules::FloatValuesOptions;
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::{Report, RuleContext, TokenRule};

static NAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\.nan|\.NaN|\.NAN)$").unwrap());
static INF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(\.inf|\.Inf|\.INF)$").unwrap());
static SCIENTIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)$").unwrap()
});
static MISSING_NUMERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?(\.[0-9]+)([eE][-+]?[0-9]+)?$").unwrap());

pub struct FloatValues {
    options: FloatValuesOptions,
}

impl FloatValues {
    pub fn new(options: FloatValuesOptions) -> Self {
        Self { options }
    }
}

impl TokenRule for FloatValues {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        // An explicit tag decides the type, not the spelling.
        if event.prev.is_some_and(|p| p.kind == TokenKind::Tag) || !token.is_plain_scalar() {
            return;
        }

        let value = token.value();
        let line = token.start.line + 1;
        let column = token.start.column + 1;
        if self.options.forbid_nan && NAN.is_match(value) {
            emit!(report, line, column, "forbidden not a number value \"{value}\"");
        }
        if self.options.forbid_inf && INF.is_match(value) {
            emit!(report, line, column, "forbidden infinite value \"{value}\"");
        }
        if self.options.forbid_scientific_notation && SCIENTIFIC.is_match(value) {
            emit!(report, line, column, "forbidden scientific notation \"{value}\"");
        }
        if self.options.require_numeral_before_decimal && MISSING_NUMERAL.is_match(value) {
            emit!(report, line, column, "forbidden decimal missing 0 prefix \"{value}\"");
        }
    }
}
