//! String predicates. Pure checks — no I/O, but they share the same
//! asynchronous invocation shape as every other rule.

use serde_json::Value;

use crate::args::{want_count, want_str};
use crate::rule::{Rule, RuleFailure};

/// The string has at least the given number of characters. Args: `[s, min]`.
pub fn string_is_min_length() -> Rule {
    Rule::new(
        "string is min length",
        "the string has at least the required number of characters",
        |args: Vec<Value>| async move {
            let s = want_str("string is min length", &args, 0)?;
            let min = want_count("string is min length", &args, 1)?;
            let len = s.chars().count() as u64;
            if len >= min {
                Ok(format!("String '{s}' is at least {min} characters long"))
            } else {
                Err(RuleFailure::new(format!(
                    "String '{s}' has length {len}, expected at least {min}"
                )))
            }
        },
    )
}

/// The string has at most the given number of characters. Args: `[s, max]`.
pub fn string_is_max_length() -> Rule {
    Rule::new(
        "string is max length",
        "the string has at most the allowed number of characters",
        |args: Vec<Value>| async move {
            let s = want_str("string is max length", &args, 0)?;
            let max = want_count("string is max length", &args, 1)?;
            let len = s.chars().count() as u64;
            if len <= max {
                Ok(format!("String '{s}' is at most {max} characters long"))
            } else {
                Err(RuleFailure::new(format!(
                    "String '{s}' has length {len}, expected at most {max}"
                )))
            }
        },
    )
}

/// The two strings are identical. Args: `[a, b]`.
pub fn strings_are_equal() -> Rule {
    Rule::new(
        "strings are equal",
        "the two strings are identical",
        |args: Vec<Value>| async move {
            let a = want_str("strings are equal", &args, 0)?;
            let b = want_str("strings are equal", &args, 1)?;
            if a == b {
                Ok(format!("Strings are both '{a}'"))
            } else {
                Err(RuleFailure::new(format!(
                    "String '{a}' does not equal '{b}'"
                )))
            }
        },
    )
}
