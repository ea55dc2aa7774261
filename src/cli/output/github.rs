use std::path::Path;

use crate::types::{CheckResult, Diagnostic, Level};

fn annotation(d: &Diagnostic, project_root: &Path) -> String {
    let rel = super::relative_path(&d.file, project_root);

    let level = match d.problem.level {
        Level::Error => "error",
        Level::Warning => "warning",
        Level::Info => "notice",
    };

    format!(
        "::{level} file={rel},line={line},col={column},title={rule}::{message}",
        line = d.problem.line,
        column = d.problem.column,
        rule = d.problem.rule_name(),
        message = d.problem.message,
    )
}

pub fn render(result: &CheckResult, project_root: &Path) {
    for d in &result.diagnostics {
        println!("{}", annotation(d, project_root));
    }
}
