use crate::emit;
use crate::parser::types::Line;
use crate::rules::{LineRule, Report};

pub struct TrailingSpaces;

impl LineRule for TrailingSpaces {
    fn check(&self, line: &Line<'_>, report: &mut Report) {
        let content = line.text.trim_end_matches([' ', '\t', '\r', '\x0b', '\x0c']);
        if content.len() == line.text.len() {
            return;
        }
        if line.text[content.len()..].starts_with([' ', '\t']) {
            emit!(report, line.number, content.chars().count() + 1, "trailing spaces");
        }
    }
}
