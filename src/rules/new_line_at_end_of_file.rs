use crate::emit;
use crate::parser::types::Line;
use crate::rules::{LineRule, Report};

pub struct NewLineAtEndOfFile;

impl LineRule for NewLineAtEndOfFile {
    fn check(&self, line: &Line<'_>, report: &mut Report) {
        if !line.terminated && !line.text.is_empty() {
            emit!(
                report,
                line.number,
                line.text.chars().count() + 1,
                "no new line character at the end of file"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{at, run};
    use crate::rules::Rule;

    fn lint(source: &str) -> Vec<(usize, usize, String)> {
        run(Rule::Line(Box::new(NewLineAtEndOfFile)), source)
    }

    const MESSAGE: &str = "no new line character at the end of file";

    #[test]
    fn test_terminated() {
        assert!(lint("").is_empty());
        assert!(lint("\n").is_empty());
        assert!(lint("word\n").is_empty());
        assert!(lint("Sentence.\n").is_empty());
        assert!(lint("---\nyaml: document\r\n").is_empty());
    }

    #[test]
    fn test_missing_newline() {
        assert_eq!(lint("word"), vec![at(1, 5, MESSAGE)]);
        assert_eq!(lint("Sentence."), vec![at(1, 10, MESSAGE)]);
        assert_eq!(lint("---\nyaml: document\n...\nend"), vec![at(4, 4, MESSAGE)]);
    }
}
