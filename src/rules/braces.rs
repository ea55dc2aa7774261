use crate::config::rules::{FlowCollectionOptions, Forbid, Spacing};
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::utils::SpacingCheck;
use crate::rules::{Report, RuleContext, TokenRule};

/// The tokens and wording that distinguish `{ }` from `[ ]`.
pub(crate) struct Delimiters {
    pub open: TokenKind,
    pub close: TokenKind,
    pub forbidden: &'static str,
    pub too_few: &'static str,
    pub too_many: &'static str,
    pub too_few_empty: &'static str,
    pub too_many_empty: &'static str,
}

const BRACES: Delimiters = Delimiters {
    open: TokenKind::FlowMappingStart,
    close: TokenKind::FlowMappingEnd,
    forbidden: "forbidden flow mapping",
    too_few: "too few spaces inside braces",
    too_many: "too many spaces inside braces",
    too_few_empty: "too few spaces inside empty braces",
    too_many_empty: "too many spaces inside empty braces",
};

pub struct Braces {
    options: FlowCollectionOptions,
}

impl Braces {
    pub fn new(options: FlowCollectionOptions) -> Self {
        Self { options }
    }
}

impl TokenRule for Braces {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        check_flow_collection(&self.options, &BRACES, event, report);
    }
}

/// Shared by `braces` and `brackets`.
pub(crate) fn check_flow_collection(
    options: &FlowCollectionOptions,
    delimiters: &Delimiters,
    event: &TokenEvent<'_>,
    report: &mut Report,
) {
    let token = event.curr;
    let next_closes = event.next_kind() == Some(delimiters.close);

    if token.kind == delimiters.open {
        let forbidden = match options.forbid {
            Forbid::Always => true,
            Forbid::NonEmpty => !next_closes,
            Forbid::Never => false,
        };
        if forbidden {
            emit!(report, token.start.line + 1, token.end.column + 1, "{}", delimiters.forbidden);
        } else if next_closes {
            let empty = SpacingCheck {
                min: fallback(options.min_spaces_inside_empty, options.min_spaces_inside),
                max: fallback(options.max_spaces_inside_empty, options.max_spaces_inside),
                too_few: delimiters.too_few_empty,
                too_many: delimiters.too_many_empty,
            };
            empty.after(token, event.next, report);
        } else {
            inside(options, delimiters).after(token, event.next, report);
        }
    } else if token.kind == delimiters.close
        && event.prev.is_none_or(|p| p.kind != delimiters.open)
    {
        inside(options, delimiters).before(event.prev, token, report);
    }
}

fn inside(options: &FlowCollectionOptions, delimiters: &Delimiters) -> SpacingCheck {
    SpacingCheck {
        min: options.min_spaces_inside,
        max: options.max_spaces_inside,
        too_few: delimiters.too_few,
        too_many: delimiters.too_many,
    }
}

/// The `_empty` bounds default to the general ones when unset.
fn fallback(specific: Spacing, general: Spacing) -> Spacing {
    if specific.0.is_some() {
        specific
    } else {
        general
    }
}
