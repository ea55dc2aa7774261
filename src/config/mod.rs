pub mod rules;

use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use rules::RulesConfig;

pub const CONFIG_FILE: &str = ".yamllint.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub format: OutputFormat,
    pub yaml_files: Vec<String>,
    pub ignore: Vec<String>,
    pub rules: RulesConfig,
}

/// Overrides applied on top of the default configuration by
/// `extends = "relaxed"`.
const RELAXED: &str = r#"
[rules.braces]
level = "warning"
max_spaces_inside = 1

[rules.brackets]
level = "warning"
max_spaces_inside = 1

[rules.colons]
level = "warning"

[rules.commas]
level = "warning"

[rules.comments]
enabled = false

[rules.comments_indentation]
enabled = false

[rules.document_start]
enabled = false

[rules.hyphens]
level = "warning"

[rules.indentation]
level = "warning"
indent_sequences = "consistent"

[rules.truthy]
enabled = false
"#;

const TOP_LEVEL_KEYS: [&str; 4] = ["format", "yaml_files", "ignore", "rules"];

impl Default for Config {
    fn default() -> Self {
        Self::resolve(toml::Table::new()).expect("built-in configuration is valid")
    }
}

impl Config {
    pub fn load(config_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let path = config_path.map(Path::to_path_buf).or_else(|| {
            let default = project_root.join(CONFIG_FILE);
            default.exists().then_some(default)
        });

        match path {
            Some(path) => {
                tracing::debug!("loading configuration from {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                Self::parse(&content, project_root)
            }
            None => Ok(Config::default()),
        }
    }

    /// Parses a configuration whose `ignore_from_file` paths are relative
    /// to the current directory.
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("."))
    }

    fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut table: toml::Table =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Config parse error: {e}"))?;
        let ignore_files = take_ignore_files(&mut table)?;
        if !ignore_files.is_empty() && table.contains_key("ignore") {
            bail!("Config error: \"ignore\" and \"ignore_from_file\" cannot be used together");
        }

        let mut config = Self::resolve(table)?;
        for file in &ignore_files {
            let path = base.join(file);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                anyhow::anyhow!("Config error: cannot read ignore file {}: {e}", path.display())
            })?;
            let patterns = gitignore_patterns(&content);
            tracing::debug!("{} ignore patterns from {}", patterns.len(), path.display());
            config.ignore.extend(patterns);
        }
        Ok(config)
    }

    /// Layers `user` over its preset, rejects unknown keys and checks value
    /// domains.
    fn resolve(mut user: toml::Table) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(Self::default_toml())?;

        match user.remove("extends") {
            None => {}
            Some(toml::Value::String(preset)) if preset == "default" => {}
            Some(toml::Value::String(preset)) if preset == "relaxed" => {
                merge(&mut merged, toml::from_str(RELAXED)?);
            }
            Some(other) => bail!("Config error: unknown preset {other} in extends"),
        }

        check_keys(&user, &merged)?;
        merge(&mut merged, user);

        let config: Config = toml::Value::Table(merged)
            .try_into()
            .map_err(|e| anyhow::anyhow!("Config parse error: {e}"))?;
        config
            .rules
            .validate()
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(config)
    }

    pub const fn default_toml() -> &'static str {
        r#"# yamllint configuration

# Start from another preset: "default" or "relaxed".
# extends = "relaxed"

# Output format when --format is not given: "text", "json", "github" or "parsable".
format = "text"

# Which files to lint (glob patterns).
yaml_files = ["*.yaml", "*.yml", ".yamllint"]

# Paths to skip entirely
ignore = [".git", "node_modules", "target"]

# Or read gitignore-style patterns from files instead of setting `ignore`;
# they are added to the built-in list above.
# ignore_from_file = [".gitignore"]

# Every rule accepts `enabled`, `level` ("error", "warning" or "info") and
# `ignore` (glob patterns of files the rule skips).
# Integer spacing options use -1 for "unchecked".

[rules.braces]
enabled = true
level = "error"
forbid = false            # or true, or "non-empty"
min_spaces_inside = 0
max_spaces_inside = 0
min_spaces_inside_empty = -1
max_spaces_inside_empty = -1

[rules.brackets]
enabled = true
level = "error"
forbid = false
min_spaces_inside = 0
max_spaces_inside = 0
min_spaces_inside_empty = -1
max_spaces_inside_empty = -1

[rules.colons]
enabled = true
level = "error"
max_spaces_before = 0
max_spaces_after = 1

[rules.commas]
enabled = true
level = "error"
max_spaces_before = 0
min_spaces_after = 1
max_spaces_after = 1

[rules.comments]
enabled = true
level = "warning"
require_starting_space = true
ignore_shebangs = true
min_spaces_from_content = 2

[rules.comments_indentation]
enabled = true
level = "warning"

[rules.document_start]
enabled = true
level = "warning"
present = true

[rules.empty_values]
enabled = false
level = "error"
forbid_in_block_mappings = true
forbid_in_flow_mappings = true
forbid_in_block_sequences = true

[rules.float_values]
enabled = false
level = "error"
require_numeral_before_decimal = false
forbid_scientific_notation = false
forbid_nan = false
forbid_inf = false

[rules.hyphens]
enabled = true
level = "error"
max_spaces_after = 1
min_spaces_after = -1
check_scalars = false

[rules.indentation]
enabled = true
level = "error"
spaces = "consistent"     # or a positive integer
indent_sequences = true   # or false, "whatever", "consistent"
check_multi_line_strings = false

[rules.key_duplicates]
enabled = true
level = "error"

[rules.key_ordering]
enabled = false
level = "error"

[rules.new_line_at_end_of_file]
enabled = true
level = "error"

[rules.trailing_spaces]
enabled = true
level = "error"

[rules.truthy]
enabled = true
level = "warning"
allowed_values = ["true", "false"]
check_keys = true
"#
    }
}

/// Recursively overlays `overlay` onto `base`. Tables merge key by key;
/// any other value replaces what was there.
fn merge(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(table) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge(existing, table);
                continue;
            }
            base.insert(key, toml::Value::Table(table));
        } else {
            base.insert(key, value);
        }
    }
}

/// Removes `ignore_from_file`, a single path or a list of paths.
fn take_ignore_files(table: &mut toml::Table) -> Result<Vec<PathBuf>> {
    let invalid = || anyhow::anyhow!("Config error: ignore_from_file must be a path or a list of paths");
    match table.remove("ignore_from_file") {
        None => Ok(Vec::new()),
        Some(toml::Value::String(path)) => Ok(vec![PathBuf::from(path)]),
        Some(toml::Value::Array(paths)) => paths
            .into_iter()
            .map(|p| match p {
                toml::Value::String(path) => Ok(PathBuf::from(path)),
                _ => Err(invalid()),
            })
            .collect(),
        Some(_) => Err(invalid()),
    }
}

/// Glob patterns from a gitignore-style file. Negated patterns are dropped
/// with a warning, and so are the slashes anchoring a pattern or marking a
/// directory.
fn gitignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            if line.starts_with('!') {
                tracing::warn!("negated ignore pattern {line} is not supported");
                return None;
            }
            let line = line.strip_prefix('\\').unwrap_or(line);
            let line = line.strip_prefix('/').unwrap_or(line);
            let line = line.strip_suffix('/').unwrap_or(line);
            (!line.is_empty()).then(|| line.to_string())
        })
        .collect()
}

fn check_keys(user: &toml::Table, known: &toml::Table) -> Result<()> {
    for key in user.keys() {
        if !TOP_LEVEL_KEYS.contains(&key.as_str()) {
            bail!("Config error: unknown key \"{key}\"");
        }
    }

    let Some(rules) = user.get("rules") else {
        return Ok(());
    };
    let Some(rules) = rules.as_table() else {
        bail!("Config error: \"rules\" must be a table");
    };
    let known_rules = known.get("rules").and_then(toml::Value::as_table);

    for (rule, options) in rules {
        let Some(known_options) = known_rules
            .and_then(|r| r.get(rule))
            .and_then(toml::Value::as_table)
        else {
            bail!("Config error: unknown rule \"{rule}\"");
        };
        let Some(options) = options.as_table() else {
            bail!("Config error: rules.{rule} must be a table");
        };
        if let Some(option) = options
            .keys()
            .find(|k| k.as_str() != "ignore" && !known_options.contains_key(k.as_str()))
        {
            bail!("Config error: unknown option \"{option}\" for rule {rule}");
        }
    }
    Ok(())
}
