use crate::config::rules::{TruthyOptions, TRUTHY};
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::{Report, RuleContext, TokenRule};

pub struct Truthy {
    forbidden: Vec<&'static str>,
    message: String,
    check_keys: bool,
}

impl Truthy {
    pub fn new(options: &TruthyOptions) -> Self {
        let mut allowed: Vec<&str> = options.allowed_values.iter().map(String::as_str).collect();
        allowed.sort_unstable();
        Self {
            forbidden: TRUTHY
                .into_iter()
                .filter(|v| !options.allowed_values.iter().any(|a| a == v))
                .collect(),
            message: format!("truthy value should be one of [{}]", allowed.join(", ")),
            check_keys: options.check_keys,
        }
    }
}

impl TokenRule for Truthy {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        let prev = event.prev.map(|p| p.kind);
        if prev == Some(TokenKind::Tag) || !token.is_plain_scalar() {
            return;
        }
        if !self.check_keys && prev == Some(TokenKind::Key) {
            return;
        }
        if self.forbidden.contains(&token.value()) {
            emit!(report, token.start.line + 1, token.start.column + 1, "{}", self.message);
        }
    }
}
