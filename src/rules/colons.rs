use crate::config::rules::ColonsOptions;
use crate::parser::types::{TokenEvent, TokenKind};
use crate::rules::utils::{is_explicit_key, SpacingCheck};
use crate::rules::{Report, RuleContext, TokenRule};

pub struct Colons {
    before: SpacingCheck,
    after: SpacingCheck,
    after_question_mark: SpacingCheck,
}

impl Colons {
    pub fn new(options: ColonsOptions) -> Self {
        Self {
            before: SpacingCheck::max_only(options.max_spaces_before, "too many spaces before colon"),
            after: SpacingCheck::max_only(options.max_spaces_after, "too many spaces after colon"),
            after_question_mark: SpacingCheck::max_only(
                options.max_spaces_after,
                "too many spaces after question mark",
            ),
        }
    }
}

impl TokenRule for Colons {
    fn check(&self, event: &TokenEvent<'_>, _context: &mut RuleContext, report: &mut Report) {
        let token = event.curr;
        match token.kind {
            TokenKind::Value => {
                // `*alias :` needs the space, or the colon joins the alias name.
                let after_alias = event.prev.is_some_and(|p| {
                    p.kind == TokenKind::Alias && token.start.index == p.end.index + 1
                });
                if !after_alias {
                    self.before.before(event.prev, token, report);
                    self.after.after(token, event.next, report);
                }
            }
            TokenKind::Key if is_explicit_key(token, event.source) => {
                self.after_question_mark.after(token, event.next, report);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rules::Spacing;
    use crate::rules::testing::{at, run};
    use crate::rules::Rule;

    fn lint(before: i64, after: i64, source: &str) -> Vec<(usize, usize, String)> {
        let options = ColonsOptions {
            max_spaces_before: Spacing::try_from(before).unwrap(),
            max_spaces_after: Spacing::try_from(after).unwrap(),
        };
        run(Rule::Token(Box::new(Colons::new(options))), source)
    }

    #[test]
    fn test_spaces_before() {
        assert!(lint(0, -1, "---\nobject:\n  k1:\n    - a\n  k2: v2\n").is_empty());
        assert_eq!(
            lint(0, -1, "---\nobject:\n  k1 :\n    - a\n  k2: v2\n"),
            vec![at(3, 5, "too many spaces before colon")]
        );
        assert_eq!(
            lint(0, -1, "---\nlib :\n  - var\n"),
            vec![at(2, 4, "too many spaces before colon")]
        );
        assert_eq!(
            lint(0, -1, "---\n- lib :\n    - var\n"),
            vec![at(2, 6, "too many spaces before colon")]
        );
        assert_eq!(
            lint(0, -1, "---\na: {b: {c : d, e : f}}\n"),
            vec![
                at(2, 10, "too many spaces before colon"),
                at(2, 17, "too many spaces before colon"),
            ]
        );
    }

    #[test]
    fn test_spaces_before_max() {
        assert!(lint(3, -1, "---\nobject :\n  k1   :\n    - a\n  k2  : v2\n").is_empty());
        assert_eq!(
            lint(3, -1, "---\nobject :\n  k1    :\n    - a\n  k2  : v2\n"),
            vec![at(3, 8, "too many spaces before colon")]
        );
    }

    #[test]
    fn test_explicit_mappings() {
        assert!(lint(0, 1, "---\nobject:\n  ? key\n  : value\n").is_empty());
        assert!(lint(0, 1, "---\n? >\n    multi-line\n    key\n: >\n    multi-line\n    value\n").is_empty());
        assert_eq!(
            lint(0, 1, "---\n- ? >\n      multi-line\n      key\n  :  >\n       multi-line\n       value\n"),
            vec![at(5, 5, "too many spaces after colon")]
        );
    }

    #[test]
    fn test_spaces_after() {
        assert!(lint(-1, 1, "---\nkey: value\n").is_empty());
        assert_eq!(
            lint(-1, 1, "---\nkey:  value\n"),
            vec![at(2, 6, "too many spaces after colon")]
        );
        assert_eq!(
            lint(-1, 1, "---\nobject:\n  other: {key:  value}\n"),
            vec![at(3, 16, "too many spaces after colon")]
        );
        assert_eq!(
            lint(-1, 1, "---\na: {b: {c:  d, e :  f}}\n"),
            vec![
                at(2, 12, "too many spaces after colon"),
                at(2, 20, "too many spaces after colon"),
            ]
        );
    }

    #[test]
    fn test_spaces_after_question_mark() {
        assert!(lint(-1, 1, "---\n? key\n: value\n").is_empty());
        assert_eq!(
            lint(-1, 1, "---\n?  key\n:  value\n"),
            vec![
                at(2, 3, "too many spaces after question mark"),
                at(3, 3, "too many spaces after colon"),
            ]
        );
    }

    #[test]
    fn test_alias_needs_space() {
        assert!(lint(0, 1, "---\n- anchor: &a key\n- *a : 42\n").is_empty());
        assert_eq!(
            lint(0, 1, "---\n- anchor: &a key\n- *a  : 42\n"),
            vec![at(3, 6, "too many spaces before colon")]
        );
    }
}
