use serde::Deserialize;

use crate::types::{Level, RuleId};

/// The YAML 1.1 spellings of booleans.
pub const TRUTHY: [&str; 18] = [
    "YES", "Yes", "yes", "NO", "No", "no", "TRUE", "True", "true", "FALSE", "False", "false",
    "ON", "On", "on", "OFF", "Off", "off",
];

/// Settings every rule table carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSettings {
    pub enabled: bool,
    pub level: Level,
    /// Files this rule skips.
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig<T> {
    #[serde(flatten)]
    pub settings: RuleSettings,
    #[serde(flatten)]
    pub options: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    pub braces: RuleConfig<FlowCollectionOptions>,
    pub brackets: RuleConfig<FlowCollectionOptions>,
    pub colons: RuleConfig<ColonsOptions>,
    pub commas: RuleConfig<CommasOptions>,
    pub comments: RuleConfig<CommentsOptions>,
    pub comments_indentation: RuleConfig<NoOptions>,
    pub document_start: RuleConfig<DocumentStartOptions>,
    pub empty_values: RuleConfig<EmptyValuesOptions>,
    pub float_values: RuleConfig<FloatValuesOptions>,
    pub hyphens: RuleConfig<HyphensOptions>,
    pub indentation: RuleConfig<IndentationOptions>,
    pub key_duplicates: RuleConfig<NoOptions>,
    pub key_ordering: RuleConfig<NoOptions>,
    pub new_line_at_end_of_file: RuleConfig<NoOptions>,
    pub trailing_spaces: RuleConfig<NoOptions>,
    pub truthy: RuleConfig<TruthyOptions>,
}

impl RulesConfig {
    pub fn settings(&self, id: RuleId) -> &RuleSettings {
        match id {
            RuleId::Braces => &self.braces.settings,
            RuleId::Brackets => &self.brackets.settings,
            RuleId::Colons => &self.colons.settings,
            RuleId::Commas => &self.commas.settings,
            RuleId::Comments => &self.comments.settings,
            RuleId::CommentsIndentation => &self.comments_indentation.settings,
            RuleId::DocumentStart => &self.document_start.settings,
            RuleId::EmptyValues => &self.empty_values.settings,
            RuleId::FloatValues => &self.float_values.settings,
            RuleId::Hyphens => &self.hyphens.settings,
            RuleId::Indentation => &self.indentation.settings,
            RuleId::KeyDuplicates => &self.key_duplicates.settings,
            RuleId::KeyOrdering => &self.key_ordering.settings,
            RuleId::NewLineAtEndOfFile => &self.new_line_at_end_of_file.settings,
            RuleId::TrailingSpaces => &self.trailing_spaces.settings,
            RuleId::Truthy => &self.truthy.settings,
        }
    }

    pub fn settings_mut(&mut self, id: RuleId) -> &mut RuleSettings {
        match id {
            RuleId::Braces => &mut self.braces.settings,
            RuleId::Brackets => &mut self.brackets.settings,
            RuleId::Colons => &mut self.colons.settings,
            RuleId::Commas => &mut self.commas.settings,
            RuleId::Comments => &mut self.comments.settings,
            RuleId::CommentsIndentation => &mut self.comments_indentation.settings,
            RuleId::DocumentStart => &mut self.document_start.settings,
            RuleId::EmptyValues => &mut self.empty_values.settings,
            RuleId::FloatValues => &mut self.float_values.settings,
            RuleId::Hyphens => &mut self.hyphens.settings,
            RuleId::Indentation => &mut self.indentation.settings,
            RuleId::KeyDuplicates => &mut self.key_duplicates.settings,
            RuleId::KeyOrdering => &mut self.key_ordering.settings,
            RuleId::NewLineAtEndOfFile => &mut self.new_line_at_end_of_file.settings,
            RuleId::TrailingSpaces => &mut self.trailing_spaces.settings,
            RuleId::Truthy => &mut self.truthy.settings,
        }
    }
}

/// A space count bound. `-1` in the config file leaves it unchecked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "i64")]
pub struct Spacing(pub Option<usize>);

impl TryFrom<i64> for Spacing {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == -1 {
            return Ok(Spacing(None));
        }
        usize::try_from(value)
            .map(|n| Spacing(Some(n)))
            .map_err(|_| format!("expected -1 or a non-negative integer, got {value}"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Whether flow collections are allowed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BoolOrString")]
pub enum Forbid {
    Never,
    Always,
    NonEmpty,
}

impl TryFrom<BoolOrString> for Forbid {
    type Error = String;

    fn try_from(value: BoolOrString) -> Result<Self, Self::Error> {
        match value {
            BoolOrString::Bool(false) => Ok(Forbid::Never),
            BoolOrString::Bool(true) => Ok(Forbid::Always),
            BoolOrString::Str(s) if s == "non-empty" => Ok(Forbid::NonEmpty),
            BoolOrString::Str(s) => Err(format!(
                "expected true, false or \"non-empty\", got \"{s}\""
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IntOrString")]
pub enum IndentSpaces {
    Fixed(usize),
    /// Whatever the first indented block uses.
    Consistent,
}

impl TryFrom<IntOrString> for IndentSpaces {
    type Error = String;

    fn try_from(value: IntOrString) -> Result<Self, Self::Error> {
        match value {
            IntOrString::Int(n) if n > 0 => usize::try_from(n)
                .map(IndentSpaces::Fixed)
                .map_err(|e| e.to_string()),
            IntOrString::Int(n) => Err(format!("expected a positive integer, got {n}")),
            IntOrString::Str(s) if s == "consistent" => Ok(IndentSpaces::Consistent),
            IntOrString::Str(s) => Err(format!(
                "expected a positive integer or \"consistent\", got \"{s}\""
            )),
        }
    }
}

/// Whether block sequences nested in a mapping must be indented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BoolOrString")]
pub enum IndentSequences {
    Yes,
    No,
    Whatever,
    /// Locked to the style of the first nested sequence.
    Consistent,
}

impl TryFrom<BoolOrString> for IndentSequences {
    type Error = String;

    fn try_from(value: BoolOrString) -> Result<Self, Self::Error> {
        match value {
            BoolOrString::Bool(true) => Ok(IndentSequences::Yes),
            BoolOrString::Bool(false) => Ok(IndentSequences::No),
            BoolOrString::Str(s) => match s.as_str() {
                "whatever" => Ok(IndentSequences::Whatever),
                "consistent" => Ok(IndentSequences::Consistent),
                _ => Err(format!(
                    "expected true, false, \"whatever\" or \"consistent\", got \"{s}\""
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoOptions {}

/// Options shared by `braces` and `brackets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FlowCollectionOptions {
    pub forbid: Forbid,
    pub min_spaces_inside: Spacing,
    pub max_spaces_inside: Spacing,
    pub min_spaces_inside_empty: Spacing,
    pub max_spaces_inside_empty: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ColonsOptions {
    pub max_spaces_before: Spacing,
    pub max_spaces_after: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommasOptions {
    pub max_spaces_before: Spacing,
    pub min_spaces_after: Spacing,
    pub max_spaces_after: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommentsOptions {
    pub require_starting_space: bool,
    pub ignore_shebangs: bool,
    pub min_spaces_from_content: Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DocumentStartOptions {
    pub present: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EmptyValuesOptions {
    pub forbid_in_block_mappings: bool,
    pub forbid_in_flow_mappings: bool,
    pub forbid_in_block_sequences: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FloatValuesOptions {
    pub require_numeral_before_decimal: bool,
    pub forbid_scientific_notation: bool,
    pub forbid_nan: bool,
    pub forbid_inf: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HyphensOptions {
    pub max_spaces_after: Spacing,
    pub min_spaces_after: Spacing,
    pub check_scalars: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct IndentationOptions {
    pub spaces: IndentSpaces,
    pub indent_sequences: IndentSequences,
    pub check_multi_line_strings: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TruthyOptions {
    pub allowed_values: Vec<String>,
    pub check_keys: bool,
}

fn check_bounds(rule: &str, what: &str, min: Spacing, max: Spacing) -> Result<(), String> {
    match (min.0, max.0) {
        (Some(min), Some(max)) if min > max => Err(format!(
            "rules.{rule}: min_{what} ({min}) is greater than max_{what} ({max})"
        )),
        _ => Ok(()),
    }
}

impl RulesConfig {
    /// Checks constraints that span several options.
    pub fn validate(&self) -> Result<(), String> {
        for (rule, options) in [("braces", &self.braces.options), ("brackets", &self.brackets.options)] {
            check_bounds(rule, "spaces_inside", options.min_spaces_inside, options.max_spaces_inside)?;
            check_bounds(
                rule,
                "spaces_inside_empty",
                options.min_spaces_inside_empty,
                options.max_spaces_inside_empty,
            )?;
        }

        let commas = &self.commas.options;
        check_bounds("commas", "spaces_after", commas.min_spaces_after, commas.max_spaces_after)?;

        let hyphens = &self.hyphens.options;
        if hyphens.max_spaces_after.0 == Some(0) {
            return Err("rules.hyphens: max_spaces_after cannot be 0".to_string());
        }
        check_bounds("hyphens", "spaces_after", hyphens.min_spaces_after, hyphens.max_spaces_after)?;

        if let Some(bad) = self
            .truthy
            .options
            .allowed_values
            .iter()
            .find(|v| !TRUTHY.contains(&v.as_str()))
        {
            return Err(format!(
                "rules.truthy: allowed_values entry \"{bad}\" is not a truthy value"
            ));
        }

        Ok(())
    }
}
