mod suppress;
pub mod walk;

use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::parser;
use crate::rules::{self, Report};
use crate::types::{CheckResult, Diagnostic, LintProblem, RuleId};

/// Lints one source text. `path` selects per-rule ignores; the result is
/// sorted by position and free of duplicates.
pub fn lint(source: &str, config: &Config, path: Option<&Path>) -> Vec<LintProblem> {
    let doc = parser::build(source);
    let enabled = rules::enabled(config, path);
    tracing::debug!(
        rules = enabled.len(),
        tokens = doc.tokens.len(),
        "linting {}",
        path.map_or_else(|| "<input>".into(), |p| p.display().to_string())
    );

    let mut problems = Vec::new();
    for rule in &enabled {
        let mut report = Report::new(rule.id, rule.level);
        rule.rule.run(&doc, &mut report);
        problems.extend(report.problems);
    }

    if let Some(error) = &doc.syntax_error {
        let (line, column) = (error.mark.line + 1, error.mark.column + 1);
        // The parser's verdict replaces a rule's at the same spot.
        problems.retain(|p| (p.line, p.column) != (line, column));
        problems.push(LintProblem::syntax(
            line,
            column,
            format!("syntax error: {}", error.message),
        ));
    }

    let ids: Vec<RuleId> = enabled.iter().map(|r| r.id).collect();
    let ranges = suppress::build_ranges(&doc.comments, &ids, doc.lines.len());
    problems.retain(|p| !suppress::is_suppressed(&ranges, p));

    problems.sort_by(|a, b| {
        (a.line, a.column, a.rule, &a.message).cmp(&(b.line, b.column, b.rule, &b.message))
    });
    problems.dedup();
    problems
}

pub fn run(paths: &[PathBuf], config: &Config) -> Result<CheckResult> {
    let files = walk::discover(paths, config);
    if files.is_empty() {
        let searched: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        anyhow::bail!("No YAML files found in {}", searched.join(", "));
    }
    tracing::debug!("found {} files", files.len());

    let diagnostics = files
        .par_iter()
        .flat_map_iter(|path| {
            let problems = match std::fs::read_to_string(path) {
                Ok(source) => lint(&source, config, Some(path)),
                Err(e) => {
                    tracing::warn!("failed to read {}: {e}", path.display());
                    Vec::new()
                }
            };
            problems.into_iter().map(move |problem| Diagnostic {
                file: path.clone(),
                problem,
            })
        })
        .collect();

    Ok(CheckResult { diagnostics })
}
