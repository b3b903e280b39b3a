//! Positional-argument decoding shared by the built-in predicate libraries.
//!
//! A missing or mistyped argument is a programmer error in the rule
//! reference. It fails loudly with a reason naming the rule and what it
//! expected — there is no silent coercion and no separate error category.

use serde_json::{Map, Value};

use crate::rule::RuleFailure;

fn describe(value: Option<&Value>) -> &'static str {
    match value {
        None => "nothing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "an object",
    }
}

fn mismatch(rule: &str, idx: usize, expected: &str, got: Option<&Value>) -> RuleFailure {
    RuleFailure::new(format!(
        "Rule '{rule}' expected {expected} as argument {idx}, got {}",
        describe(got)
    ))
}

pub(crate) fn want_str(rule: &str, args: &[Value], idx: usize) -> Result<String, RuleFailure> {
    match args.get(idx) {
        Some(Value::String(s)) => Ok(s.clone()),
        other => Err(mismatch(rule, idx, "a string", other)),
    }
}

pub(crate) fn want_count(rule: &str, args: &[Value], idx: usize) -> Result<u64, RuleFailure> {
    match args.get(idx) {
        Some(Value::Number(n)) if n.as_u64().is_some() => Ok(n.as_u64().unwrap_or_default()),
        other => Err(mismatch(rule, idx, "a non-negative integer", other)),
    }
}

pub(crate) fn want_object(
    rule: &str,
    args: &[Value],
    idx: usize,
) -> Result<Map<String, Value>, RuleFailure> {
    match args.get(idx) {
        Some(Value::Object(map)) => Ok(map.clone()),
        other => Err(mismatch(rule, idx, "an object", other)),
    }
}

/// An array of key names, decoded to strings.
pub(crate) fn want_keys(rule: &str, args: &[Value], idx: usize) -> Result<Vec<String>, RuleFailure> {
    let entries = match args.get(idx) {
        Some(Value::Array(entries)) => entries,
        other => return Err(mismatch(rule, idx, "an array of key names", other)),
    };

    let mut keys = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            Value::String(s) => keys.push(s.clone()),
            other => return Err(mismatch(rule, idx, "an array of key names", Some(other))),
        }
    }
    Ok(keys)
}
