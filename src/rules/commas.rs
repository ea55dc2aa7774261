use crate::config::rules::CommasOptions;
use crate::emit;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::utils::SpacingCheck;
use crate::rules::{Report, RuleContext, TokenRule};

pub struct Commas {
    before: SpacingCheck,
    after: SpacingCheck,
}

impl Commas {
    pub fn new(options: CommasOptions) -> Self {
        Self {
            before: SpacingCheck::max_only(options.max_spaces_before, "too many spaces before comma"),
            after: SpacingCheck {
                min: options.min_spaces_after,
                max: options.max_spaces_after,
                too_few: "too few spaces after comma",
                too_many: "too many spaces after comma",
            },
        }
    }
}

impl TokenRule for Commas {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        if token.kind != TokenKind::FlowEntry {
            return;
        }

        let starts_line = event.prev.is_some_and(|p| p.end.line < token.start.line);
        if starts_line && self.before.max.0.is_some() {
            emit!(
                report,
                token.start.line + 1,
                token.start.column.max(1),
                "too many spaces before comma"
            );
        } else {
            self.before.before(event.prev, token, report);
        }

        self.after.after(token, event.next, report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rules::Spacing;
    use crate::rules::testing::{at, run};
    use crate::rules::Rule;

    fn lint(before: i64, min_after: i64, max_after: i64, source: &str) -> Vec<(usize, usize, String)> {
        let options = CommasOptions {
            max_spaces_before: Spacing::try_from(before).unwrap(),
            min_spaces_after: Spacing::try_from(min_after).unwrap(),
            max_spaces_after: Spacing::try_from(max_after).unwrap(),
        };
        run(Rule::Token(Box::new(Commas::new(options))), source)
    }

    #[test]
    fn test_spaces_before() {
        assert!(lint(0, 0, -1, "---\narray: [1, 2,  3, 4]\n").is_empty());
        assert_eq!(
            lint(0, 0, -1, "---\narray: [1 , 2,  3      , 4]\n"),
            vec![
                at(2, 10, "too many spaces before comma"),
                at(2, 23, "too many spaces before comma"),
            ]
        );
        assert_eq!(
            lint(0, 0, -1, "---\ndict: {a: b, c: \"1 2 3\" , d: e,  f: [g, h]}\n"),
            vec![at(2, 24, "too many spaces before comma")]
        );
        assert_eq!(
            lint(0, 0, -1, "---\nmap: {\n  key1: val1,\n  key2: val2 ,\n}\n"),
            vec![at(4, 13, "too many spaces before comma")]
        );
    }

    #[test]
    fn test_comma_on_new_line() {
        assert_eq!(
            lint(0, 0, -1, "---\nflow-seq: [1, 2, 3\n           , 4, 5, 6]\n"),
            vec![at(3, 11, "too many spaces before comma")]
        );
        assert_eq!(
            lint(0, 0, -1, "---\n[\n1,\n2\n, 3\n]\n"),
            vec![at(5, 1, "too many spaces before comma")]
        );
        assert!(lint(-1, 0, -1, "---\n[\n1,\n2\n, 3\n]\n").is_empty());
    }

    #[test]
    fn test_spaces_before_max_three() {
        assert!(lint(3, 0, -1, "---\narray: [1 , 2, 3   , 4]\n").is_empty());
        assert_eq!(
            lint(3, 0, -1, "---\narray: [1 , 2, 3    , 4]\n"),
            vec![at(2, 20, "too many spaces before comma")]
        );
    }

    #[test]
    fn test_min_spaces_after() {
        let source = "---\n- [one, two , three,four]\n- {five,six , seven, eight}\n- [\n  nine,  ten\n  , eleven\n  ,twelve\n]\n- {\n  thirteen: 13,  fourteen\n  , fifteen: 15\n  ,sixteen: 16\n}\n";
        assert_eq!(
            lint(-1, 1, -1, source),
            vec![
                at(2, 21, "too few spaces after comma"),
                at(3, 9, "too few spaces after comma"),
                at(7, 4, "too few spaces after comma"),
                at(12, 4, "too few spaces after comma"),
            ]
        );
    }

    #[test]
    fn test_max_spaces_after() {
        assert!(lint(-1, 0, 1, "---\narray: [1, 2, 3, 4]\n").is_empty());
        assert_eq!(
            lint(-1, 0, 1, "---\narray: [1,  2, 3,     4]\n"),
            vec![
                at(2, 12, "too many spaces after comma"),
                at(2, 22, "too many spaces after comma"),
            ]
        );
    }
}
