use std::fmt::Write;

use strsim::jaro_winkler;

use crate::config::Config;
use crate::rules;
use crate::types::RuleId;

pub fn list_rules() -> String {
    let mut out = String::from("Available rules:\n\n");
    for id in RuleId::ALL {
        let _ = writeln!(out, "  {:<24} {}", id.as_str(), rules::description(id));
    }
    out.push_str("\nRun `yamllint explain <rule>` for details.");
    out
}

/// Description of `rule` followed by its table from the default
/// configuration.
pub fn explain(rule: &str) -> Option<String> {
    let id = RuleId::from_name(rule)?;
    let mut out = format!("{}: {}\n\n", id.as_str(), rules::description(id));
    let _ = writeln!(out, "Default configuration:\n");
    for line in default_table(id) {
        let _ = writeln!(out, "  {line}");
    }
    Some(out.trim_end().to_string())
}

/// The known rule closest to a misspelt `rule`, if any is close enough.
pub fn suggest(rule: &str) -> Option<&'static str> {
    RuleId::ALL
        .into_iter()
        .map(|id| (id.as_str(), jaro_winkler(rule, id.as_str())))
        .filter(|&(_, score)| score >= 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

fn default_table(id: RuleId) -> impl Iterator<Item = &'static str> {
    let header = format!("[rules.{}]", id.config_key());
    Config::default_toml()
        .lines()
        .skip_while(move |line| *line != header)
        .enumerate()
        .take_while(|(i, line)| *i == 0 || !(line.is_empty() || line.starts_with('[')))
        .map(|(_, line)| line)
}
