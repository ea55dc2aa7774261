use crate::config::rules::HyphensOptions;
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::utils::SpacingCheck;
use crate::rules::{Report, RuleContext, TokenRule};

const TOO_FEW: &str = "too few spaces after hyphen";

pub struct Hyphens {
    after: SpacingCheck,
    check_scalars: bool,
}

impl Hyphens {
    pub fn new(options: HyphensOptions) -> Self {
        Self {
            after: SpacingCheck {
                min: options.min_spaces_after,
                max: options.max_spaces_after,
                too_few: TOO_FEW,
                too_many: "too many spaces after hyphen",
            },
            check_scalars: options.check_scalars,
        }
    }
}

/// A plain scalar such as `-value` was most likely meant as a list item.
fn looks_like_entry(value: &str) -> bool {
    let mut chars = value.chars();
    chars.next() == Some('-')
        && chars
            .next()
            .is_some_and(|c| !c.is_whitespace() && !c.is_ascii_digit() && c != '.' && c != '-')
}

impl TokenRule for Hyphens {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        if token.kind == TokenKind::BlockEntry {
            self.after.after(token, event.next, report);
        } else if self.check_scalars && token.is_plain_scalar() && looks_like_entry(token.value()) {
            emit!(report, token.start.line + 1, token.start.column + 1, "{TOO_FEW}");
        }
    }
}
