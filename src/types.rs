use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    #[default]
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        })
    }
}

/// Every rule the linter knows about. Declaration order is the order rules
/// are evaluated in and the tie-breaker when sorting problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleId {
    Braces,
    Brackets,
    Colons,
    Commas,
    Comments,
    CommentsIndentation,
    DocumentStart,
    EmptyValues,
    FloatValues,
    Hyphens,
    Indentation,
    KeyDuplicates,
    KeyOrdering,
    NewLineAtEndOfFile,
    TrailingSpaces,
    Truthy,
}

impl RuleId {
    pub const ALL: [RuleId; 16] = [
        RuleId::Braces,
        RuleId::Brackets,
        RuleId::Colons,
        RuleId::Commas,
        RuleId::Comments,
        RuleId::CommentsIndentation,
        RuleId::DocumentStart,
        RuleId::EmptyValues,
        RuleId::FloatValues,
        RuleId::Hyphens,
        RuleId::Indentation,
        RuleId::KeyDuplicates,
        RuleId::KeyOrdering,
        RuleId::NewLineAtEndOfFile,
        RuleId::TrailingSpaces,
        RuleId::Truthy,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RuleId::Braces => "braces",
            RuleId::Brackets => "brackets",
            RuleId::Colons => "colons",
            RuleId::Commas => "commas",
            RuleId::Comments => "comments",
            RuleId::CommentsIndentation => "comments-indentation",
            RuleId::DocumentStart => "document-start",
            RuleId::EmptyValues => "empty-values",
            RuleId::FloatValues => "float-values",
            RuleId::Hyphens => "hyphens",
            RuleId::Indentation => "indentation",
            RuleId::KeyDuplicates => "key-duplicates",
            RuleId::KeyOrdering => "key-ordering",
            RuleId::NewLineAtEndOfFile => "new-line-at-end-of-file",
            RuleId::TrailingSpaces => "trailing-spaces",
            RuleId::Truthy => "truthy",
        }
    }

    /// Key of the rule's table in the config file (`[rules.<key>]`).
    pub fn config_key(self) -> String {
        self.as_str().replace('-', "_")
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RuleId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One reported issue. Lines and columns are 1-based. A problem without a
/// rule id comes from the syntax channel and is never suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintProblem {
    pub line: usize,
    pub column: usize,
    pub rule: Option<RuleId>,
    pub level: Level,
    pub message: String,
}

impl LintProblem {
    pub fn syntax(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            rule: None,
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn rule_name(&self) -> &'static str {
        self.rule.map_or("syntax", RuleId::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    #[serde(flatten)]
    pub problem: LintProblem,
}

#[derive(Debug, Default)]
pub struct CheckResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn error_count(&self) -> usize {
        self.count(Level::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Level::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Level::Info)
    }

    fn count(&self, level: Level) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.problem.level == level)
            .count()
    }

    pub fn has_level_at_least(&self, threshold: Level) -> bool {
        self.diagnostics.iter().any(|d| d.problem.level >= threshold)
    }
}
