pub mod braces;
pub mod brackets;
pub mod colons;
pub mod commas;
pub mod comments;
pub mod comments_indentation;
pub mod document_start;
pub mod empty_values;
pub mod float_values;
pub mod hyphens;
pub mod indentation;
pub mod key_duplicates;
pub mod key_ordering;
pub mod macros;
pub mod new_line_at_end_of_file;
pub mod trailing_spaces;
pub mod truthy;
pub mod utils;

use std::any::Any;
use std::path::Path;

use crate::config::rules::RulesConfig;
use crate::config::Config;
use crate::engine::walk::{build_glob_set, matches_path};
use crate::parser::types::{Comment, Document, Line, TokenEvent};
use crate::types::{Level, LintProblem, RuleId};

/// A rule that looks at one physical line at a time.
pub trait LineRule: Send + Sync {
    fn check(&self, line: &Line<'_>, report: &mut Report);
}

/// A rule that looks at one comment at a time.
pub trait CommentRule: Send + Sync {
    fn check(&self, comment: &Comment<'_>, report: &mut Report);
}

/// A rule that walks the token stream, carrying state across tokens in its
/// own [`RuleContext`].
pub trait TokenRule: Send + Sync {
    fn check(&self, event: &TokenEvent<'_>, context: &mut RuleContext, report: &mut Report);
}

pub enum Rule {
    Line(Box<dyn LineRule>),
    Comment(Box<dyn CommentRule>),
    Token(Box<dyn TokenRule>),
}

impl Rule {
    /// Feeds the matching view of `doc` to the rule. Token rules get a
    /// fresh context per document.
    pub fn run(&self, doc: &Document<'_>, report: &mut Report) {
        match self {
            Rule::Line(rule) => doc.lines.iter().for_each(|line| rule.check(line, report)),
            Rule::Comment(rule) => doc.comments.iter().for_each(|c| rule.check(c, report)),
            Rule::Token(rule) => {
                let mut context = RuleContext::default();
                for event in doc.events() {
                    rule.check(&event, &mut context, report);
                }
            }
        }
    }
}

pub struct EnabledRule {
    pub id: RuleId,
    pub level: Level,
    pub rule: Rule,
}

/// Mutable state owned by one token rule for the length of one document.
#[derive(Default)]
pub struct RuleContext {
    slot: Option<Box<dyn Any + Send>>,
}

impl RuleContext {
    /// The rule's state, created with `T::default()` on first access.
    pub fn state<T: Default + Send + 'static>(&mut self) -> &mut T {
        if !self.slot.as_ref().is_some_and(|s| s.is::<T>()) {
            self.slot = Some(Box::new(T::default()));
        }
        match self.slot.as_mut().and_then(|s| s.downcast_mut::<T>()) {
            Some(state) => state,
            None => unreachable!("slot was just filled with a T"),
        }
    }
}

/// Collects the problems one rule reports, stamping them with the rule's id
/// and level.
pub struct Report {
    rule: RuleId,
    level: Level,
    pub problems: Vec<LintProblem>,
}

impl Report {
    pub fn new(rule: RuleId, level: Level) -> Self {
        Self {
            rule,
            level,
            problems: Vec::new(),
        }
    }

    pub fn push(&mut self, line: usize, column: usize, message: String) {
        self.problems.push(LintProblem {
            line,
            column,
            rule: Some(self.rule),
            level: self.level,
            message,
        });
    }

    /// Reports on the syntax channel: no rule id, never suppressed.
    pub fn push_syntax(&mut self, line: usize, column: usize, message: String) {
        self.problems.push(LintProblem::syntax(line, column, message));
    }
}

/// Instantiates the rules enabled for the file at `path`.
pub fn enabled(config: &Config, path: Option<&Path>) -> Vec<EnabledRule> {
    let rules = &config.rules;
    RuleId::ALL
        .into_iter()
        .filter(|&id| {
            let settings = rules.settings(id);
            settings.enabled
                && !(path.is_some_and(|p| {
                    !settings.ignore.is_empty()
                        && matches_path(p, &build_glob_set(&settings.ignore))
                }))
        })
        .map(|id| EnabledRule {
            id,
            level: rules.settings(id).level,
            rule: build(id, rules),
        })
        .collect()
}

fn build(id: RuleId, rules: &RulesConfig) -> Rule {
    match id {
        RuleId::Braces => Rule::Token(Box::new(braces::Braces::new(rules.braces.options))),
        RuleId::Brackets => Rule::Token(Box::new(brackets::Brackets::new(rules.brackets.options))),
        RuleId::Colons => Rule::Token(Box::new(colons::Colons::new(rules.colons.options))),
        RuleId::Commas => Rule::Token(Box::new(commas::Commas::new(rules.commas.options))),
        RuleId::Comments => Rule::Comment(Box::new(comments::Comments::new(rules.comments.options))),
        RuleId::CommentsIndentation => {
            Rule::Comment(Box::new(comments_indentation::CommentsIndentation))
        }
        RuleId::DocumentStart => Rule::Token(Box::new(document_start::DocumentStart::new(
            rules.document_start.options,
        ))),
        RuleId::EmptyValues => Rule::Token(Box::new(empty_values::EmptyValues::new(
            rules.empty_values.options,
        ))),
        RuleId::FloatValues => Rule::Token(Box::new(float_values::FloatValues::new(
            rules.float_values.options,
        ))),
        RuleId::Hyphens => Rule::Token(Box::new(hyphens::Hyphens::new(rules.hyphens.options))),
        RuleId::Indentation => Rule::Token(Box::new(indentation::Indentation::new(
            rules.indentation.options,
        ))),
        RuleId::KeyDuplicates => Rule::Token(Box::new(key_duplicates::KeyDuplicates)),
        RuleId::KeyOrdering => Rule::Token(Box::new(key_ordering::KeyOrdering)),
        RuleId::NewLineAtEndOfFile => {
            Rule::Line(Box::new(new_line_at_end_of_file::NewLineAtEndOfFile))
        }
        RuleId::TrailingSpaces => Rule::Line(Box::new(trailing_spaces::TrailingSpaces)),
        RuleId::Truthy => Rule::Token(Box::new(truthy::Truthy::new(&rules.truthy.options))),
    }
}

/// One-paragraph description of a rule, shown by `explain`.
pub fn description(id: RuleId) -> &'static str {
    match id {
        RuleId::Braces => "Controls spaces inside flow mappings `{ }` and can forbid them.",
        RuleId::Brackets => "Controls spaces inside flow sequences `[ ]` and can forbid them.",
        RuleId::Colons => "Controls spaces before and after colons and after `?` in explicit keys.",
        RuleId::Commas => "Controls spaces before and after commas in flow collections.",
        RuleId::Comments => {
            "Requires a space after `#` and a minimum gap between content and an inline comment."
        }
        RuleId::CommentsIndentation => "Requires comments to be indented like the content around them.",
        RuleId::DocumentStart => "Requires (or forbids) the `---` document start marker.",
        RuleId::EmptyValues => "Reports implicit null values in block mappings, flow mappings and block sequences.",
        RuleId::FloatValues => "Restricts float spellings: missing leading zero, scientific notation, NaN, infinity.",
        RuleId::Hyphens => "Controls spaces after the hyphen of a block sequence entry.",
        RuleId::Indentation => {
            "Checks indentation width, its consistency, and whether nested block sequences are indented."
        }
        RuleId::KeyDuplicates => "Reports keys that appear twice in the same mapping.",
        RuleId::KeyOrdering => "Requires mapping keys to be in alphabetical order.",
        RuleId::NewLineAtEndOfFile => "Requires a newline character at the end of the file.",
        RuleId::TrailingSpaces => "Reports whitespace at the end of a line.",
        RuleId::Truthy => "Restricts YAML 1.1 boolean spellings (yes, on, True, ...) to an allowed list.",
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::parser::build;

    /// Runs one rule over `source` and returns `(line, column, message)`
    /// triples in report order.
    pub fn run(rule: Rule, source: &str) -> Vec<(usize, usize, String)> {
        run_problems(rule, source)
            .into_iter()
            .map(|p| (p.line, p.column, p.message))
            .collect()
    }

    pub fn run_problems(rule: Rule, source: &str) -> Vec<LintProblem> {
        let doc = build(source);
        let mut report = Report::new(RuleId::Braces, Level::Error);
        rule.run(&doc, &mut report);
        report.problems
    }

    pub fn at(line: usize, column: usize, message: &str) -> (usize, usize, String) {
        (line, column, message.to_string())
    }
}
