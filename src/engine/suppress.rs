use regex::Regex;
use std::sync::LazyLock;

use crate::parser::types::Comment;
use crate::types::{LintProblem, RuleId};

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^# yamllint (disable-line|disable|enable)((?: rule:\S+)*)\s*$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveKind {
    Disable,
    Enable,
    DisableLine,
}

#[derive(Debug, PartialEq, Eq)]
struct Directive {
    line: usize,
    inline: bool,
    kind: DirectiveKind,
    /// `None` addresses every rule. Unknown ids are dropped, so an empty
    /// list addresses none.
    rules: Option<Vec<RuleId>>,
}

fn parse(comment: &Comment<'_>) -> Option<Directive> {
    let text = format!("#{}", comment.text);
    let caps = DIRECTIVE.captures(&text)?;
    let kind = match &caps[1] {
        "disable" => DirectiveKind::Disable,
        "enable" => DirectiveKind::Enable,
        _ => DirectiveKind::DisableLine,
    };
    let names: Vec<&str> = caps[2]
        .split_whitespace()
        .filter_map(|item| item.strip_prefix("rule:"))
        .collect();
    let rules = (!names.is_empty())
        .then(|| names.into_iter().filter_map(RuleId::from_name).collect());
    Some(Directive {
        line: comment.line,
        inline: comment.inline,
        kind,
        rules,
    })
}

/// Lines `start_line..=end_line` on which `rule` is silenced.
#[derive(Debug, PartialEq, Eq)]
pub struct SuppressedRange {
    rule: RuleId,
    start_line: usize,
    end_line: usize,
}

/// Turns the directive comments of one document into suppression ranges.
/// Only rules in `enabled` can be disabled.
pub fn build_ranges(
    comments: &[Comment<'_>],
    enabled: &[RuleId],
    total_lines: usize,
) -> Vec<SuppressedRange> {
    let mut ranges = Vec::new();
    let mut open: Vec<(RuleId, usize)> = Vec::new();

    for directive in comments.iter().filter_map(parse) {
        let targets: Vec<RuleId> = match &directive.rules {
            None => enabled.to_vec(),
            Some(ids) => ids.iter().copied().filter(|id| enabled.contains(id)).collect(),
        };
        match directive.kind {
            DirectiveKind::Disable => {
                for rule in targets {
                    if !open.iter().any(|&(r, _)| r == rule) {
                        open.push((rule, directive.line));
                    }
                }
            }
            DirectiveKind::Enable => open.retain(|&(rule, start)| {
                if !targets.contains(&rule) {
                    return true;
                }
                // The enable line itself is linted again.
                if start < directive.line {
                    ranges.push(SuppressedRange {
                        rule,
                        start_line: start,
                        end_line: directive.line - 1,
                    });
                }
                false
            }),
            DirectiveKind::DisableLine => {
                let line = if directive.inline {
                    directive.line
                } else {
                    directive.line + 1
                };
                ranges.extend(targets.into_iter().map(|rule| SuppressedRange {
                    rule,
                    start_line: line,
                    end_line: line,
                }));
            }
        }
    }

    for (rule, start) in open {
        ranges.push(SuppressedRange {
            rule,
            start_line: start,
            end_line: total_lines,
        });
    }

    ranges
}

/// Syntax-channel problems are never suppressed.
pub fn is_suppressed(ranges: &[SuppressedRange], problem: &LintProblem) -> bool {
    problem.rule.is_some_and(|rule| {
        ranges.iter().any(|range| {
            range.rule == rule && problem.line >= range.start_line && problem.line <= range.end_line
        })
    })
}
