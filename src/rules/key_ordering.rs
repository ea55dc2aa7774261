use crate::emit;
use crate::parser::types::TokenEvent;
use crate::rules::utils::KeyStack;
use crate::rules::{Report, RuleContext, TokenRule};

/// Keys of a mapping must be in code point order.
pub struct KeyOrdering;

impl TokenRule for KeyOrdering {
    fn check(&self, event: &TokenEvent<'_>, context: &mut RuleContext, report: &mut Report) {
        let Some((key, seen)) = context.state::<KeyStack>().track(event) else {
            return;
        };
        let name = key.value();
        if seen.iter().any(|k| name < k.as_str()) {
            emit!(
                report,
                key.start.line + 1,
                key.start.column + 1,
                "wrong ordering of key \"{name}\" in mapping"
            );
        } else {
            seen.push(name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{at, run};
    use crate::rules::Rule;

    fn lint(source: &str) -> Vec<(usize, usize, String)> {
        run(Rule::Token(Box::new(KeyOrdering)), source)
    }

    fn wrong(line: usize, column: usize, key: &str) -> (usize, usize, String) {
        at(line, column, &format!("wrong ordering of key \"{key}\" in mapping"))
    }

    #[test]
    fn test_ordering() {
        assert_eq!(
            lint("---\nblock mapping:\n  secondkey: a\n  firstkey: b\n"),
            vec![wrong(4, 3, "firstkey")]
        );
        assert_eq!(
            lint("---\nflow mapping:\n  {secondkey: a, firstkey: b}\n"),
            vec![wrong(3, 18, "firstkey")]
        );
        assert_eq!(lint("---\nsecond: before_first\nat: root\n"), vec![wrong(3, 1, "at")]);
        assert!(lint("---\nnested but OK:\n  second: {first: 1}\n  third:\n    second: 2\n").is_empty());
    }

    #[test]
    fn test_word_length() {
        assert!(lint("---\na: 1\nab: 1\nabc: 1\n").is_empty());
        assert_eq!(lint("---\na: 1\nabc: 1\nab: 1\n"), vec![wrong(4, 1, "ab")]);
    }

    #[test]
    fn test_duplicates_are_not_misordered() {
        assert!(lint("---\nkey: 1\nkey: 2\n").is_empty());
    }

    #[test]
    fn test_case_and_accents() {
        assert!(lint("---\nT-shirt: 1\nT-shirts: 2\nt-shirt: 3\nt-shirts: 4\n").is_empty());
        assert_eq!(
            lint("---\nT-shirt: 1\nt-shirt: 2\nT-shirts: 3\nt-shirts: 4\n"),
            vec![wrong(4, 1, "T-shirts")]
        );
        assert!(lint("---\nhair: true\nhais: true\nhaïr: true\nhaïssable: true\n").is_empty());
        assert_eq!(lint("---\nhaïr: true\nhais: true\n"), vec![wrong(3, 1, "hais")]);
    }

    #[test]
    fn test_key_tokens_in_flow_sequences() {
        assert!(lint("---\n[\n  key: value, mappings, in, flow: sequence\n]\n").is_empty());
    }
}
