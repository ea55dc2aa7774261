use crate::emit;
use crate::parser::types::TokenEvent;
use crate::rules::utils::KeyStack;
use crate::rules::{Report, RuleContext, TokenRule};

/// `<<` merges another mapping in and may repeat.
const MERGE_KEY: &str = "<<";

pub struct KeyDuplicates;

impl TokenRule for KeyDuplicates {
    fn check(&self, event: &TokenEvent<'_>, context: &mut RuleContext, report: &mut Report) {
        let Some((key, seen)) = context.state::<KeyStack>().track(event) else {
            return;
        };
        let name = key.value();
        if name != MERGE_KEY && seen.iter().any(|k| k == name) {
            emit!(
                report,
                key.start.line + 1,
                key.start.column + 1,
                "duplication of key \"{name}\" in mapping"
            );
        } else {
            seen.push(name.to_string());
        }
    }
}
