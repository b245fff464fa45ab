use std::fmt::Write;

use crate::EXIT_SUCCESS;
use crate::rules::builtin_rules;

/// One line per rule: id, padded, then its description.
#[must_use]
pub fn format_rule_list() -> String {
    let rules = builtin_rules();
    let width = rules.iter().map(|r| r.rule_id().len()).max().unwrap_or(0);
    let mut out = String::new();
    for rule in &rules {
        let _ = writeln!(out, "{:<width$}  {}", rule.rule_id(), rule.description());
    }
    out
}

#[must_use]
pub fn run_rules() -> i32 {
    print!("{}", format_rule_list());
    EXIT_SUCCESS
}
