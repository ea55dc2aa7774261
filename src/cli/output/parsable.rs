use std::path::Path;

use crate::types::{CheckResult, Diagnostic};

fn format_line(d: &Diagnostic, project_root: &Path) -> String {
    format!(
        "{file}:{line}:{column}: [{level}] {message} ({rule})",
        file = super::relative_path(&d.file, project_root),
        line = d.problem.line,
        column = d.problem.column,
        level = d.problem.level,
        message = d.problem.message,
        rule = d.problem.rule_name(),
    )
}

pub fn render(result: &CheckResult, project_root: &Path) {
    for d in &result.diagnostics {
        println!("{}", format_line(d, project_root));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::fixtures;

    #[test]
    fn test_parsable_lines() {
        let result = fixtures::result();
        let root = Path::new("/project");
        assert_eq!(
            format_line(&result.diagnostics[0], root),
            "ci/build.yaml:3:7: [error] wrong indentation: expected 4 but found 6 (indentation)"
        );
        assert_eq!(
            format_line(&result.diagnostics[2], root),
            "app.yml:2:10: [error] syntax error: found unexpected end of stream (syntax)"
        );
    }
}
