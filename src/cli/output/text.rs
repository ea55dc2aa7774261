use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::types::{CheckResult, Diagnostic, Level};

pub fn render(result: &CheckResult, project_root: &Path) {
    if result.diagnostics.is_empty() {
        println!();
        println!("  {}", "\u{2501}".repeat(50).dimmed());
        println!("  {}", "no problems found".green());
        println!();
        return;
    }

    let mut by_file: BTreeMap<_, Vec<_>> = BTreeMap::new();
    for d in &result.diagnostics {
        by_file
            .entry(super::relative_path(&d.file, project_root))
            .or_default()
            .push(d);
    }

    for (file, diags) in &by_file {
        println!();
        println!("  {}", file.underline());
        for d in diags {
            println!("{}", problem_line(d));
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();
    let infos = result.info_count();

    println!();
    println!("  {}", "\u{2501}".repeat(50).dimmed());
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{errors} errors").red().bold().to_string());
    }
    if warnings > 0 {
        parts.push(format!("{warnings} warnings").yellow().bold().to_string());
    }
    if infos > 0 {
        parts.push(format!("{infos} info").blue().to_string());
    }
    println!("  {} across {} files", parts.join(", "), by_file.len().bold());
    println!();
}

fn problem_line(d: &Diagnostic) -> String {
    let p = &d.problem;
    let position = format!("{}:{}", p.line, p.column);
    let level = match p.level {
        Level::Error => "error".red().to_string(),
        Level::Warning => "warning".yellow().to_string(),
        Level::Info => "info".blue().to_string(),
    };
    // Pad before colouring so escape codes don't skew the columns.
    let pad = " ".repeat(7usize.saturating_sub(p.level.to_string().len()));
    format!(
        "    {}  {level}{pad}  {}  {}",
        format!("{position:<8}").dimmed(),
        p.message,
        format!("({})", p.rule_name()).dimmed()
    )
}
