//! Object and key-set predicates over JSON objects.

use serde_json::{Map, Value};

use crate::args::{want_keys, want_object};
use crate::rule::{Rule, RuleFailure};

/// Keys from the candidate set that are present on the object, in candidate
/// order.
fn present_keys(object: &Map<String, Value>, keys: &[String]) -> Vec<String> {
    keys.iter()
        .filter(|k| object.contains_key(*k))
        .cloned()
        .collect()
}

/// The value is present (not null, not missing). Args: `[value]`.
///
/// Existence is the one check where a missing argument is the condition
/// under test rather than a malformed reference, so absence fails rather
/// than reporting a decoding error.
pub fn object_exists() -> Rule {
    Rule::new(
        "object exists",
        "the value is present",
        |args: Vec<Value>| async move {
            match args.first() {
                Some(Value::Null) | None => Err(RuleFailure::new("Object does not exist")),
                Some(_) => Ok("Object exists".to_string()),
            }
        },
    )
}

/// The value is absent (null or missing). Args: `[value]`.
pub fn object_does_not_exist() -> Rule {
    Rule::new(
        "object does not exist",
        "the value is absent",
        |args: Vec<Value>| async move {
            match args.first() {
                Some(Value::Null) | None => Ok("Object does not exist".to_string()),
                Some(_) => Err(RuleFailure::new("Object exists")),
            }
        },
    )
}

/// Every required key is present on the object. Args: `[object, keys]`.
pub fn object_has_all_keys() -> Rule {
    Rule::new(
        "object has all keys",
        "every required key is present on the object",
        |args: Vec<Value>| async move {
            let object = want_object("object has all keys", &args, 0)?;
            let keys = want_keys("object has all keys", &args, 1)?;
            let missing: Vec<String> = keys
                .iter()
                .filter(|k| !object.contains_key(*k))
                .cloned()
                .collect();
            if missing.is_empty() {
                Ok(format!("Object has all of the keys: {}", keys.join(", ")))
            } else {
                Err(RuleFailure::new(format!(
                    "Object is missing required keys: {}",
                    missing.join(", ")
                )))
            }
        },
    )
}

/// The object carries no keys outside the allowed set. Args: `[object, keys]`.
pub fn object_has_only_keys() -> Rule {
    Rule::new(
        "object has only keys",
        "the object carries no keys outside the allowed set",
        |args: Vec<Value>| async move {
            let object = want_object("object has only keys", &args, 0)?;
            let keys = want_keys("object has only keys", &args, 1)?;
            let unknown: Vec<String> = object
                .keys()
                .filter(|k| !keys.contains(k))
                .cloned()
                .collect();
            if unknown.is_empty() {
                Ok(format!("Object has only allowed keys: {}", keys.join(", ")))
            } else {
                Err(RuleFailure::new(format!(
                    "Object has unknown keys: {}",
                    unknown.join(", ")
                )))
            }
        },
    )
}

/// At most one key from the candidate set is present. Args: `[object, keys]`.
pub fn object_has_at_most_one_key() -> Rule {
    Rule::new(
        "object has at most one key",
        "at most one key from the candidate set is present",
        |args: Vec<Value>| async move {
            let object = want_object("object has at most one key", &args, 0)?;
            let keys = want_keys("object has at most one key", &args, 1)?;
            let present = present_keys(&object, &keys);
            if present.len() <= 1 {
                Ok(format!(
                    "Object has at most one of the keys: {}",
                    keys.join(", ")
                ))
            } else {
                Err(RuleFailure::new(format!(
                    "Object has {} of the keys {}, expected at most one",
                    present.len(),
                    keys.join(", ")
                )))
            }
        },
    )
}

/// At least one key from the candidate set is present. Args: `[object, keys]`.
pub fn object_has_at_least_one_key() -> Rule {
    Rule::new(
        "object has at least one key",
        "at least one key from the candidate set is present",
        |args: Vec<Value>| async move {
            let object = want_object("object has at least one key", &args, 0)?;
            let keys = want_keys("object has at least one key", &args, 1)?;
            if present_keys(&object, &keys).is_empty() {
                Err(RuleFailure::new(format!(
                    "Object has none of the keys {}, expected at least one",
                    keys.join(", ")
                )))
            } else {
                Ok(format!(
                    "Object has at least one of the keys: {}",
                    keys.join(", ")
                ))
            }
        },
    )
}

/// Exactly one key from the candidate set is present. Args: `[object, keys]`.
pub fn object_has_exactly_one_key() -> Rule {
    Rule::new(
        "object has exactly one key",
        "exactly one key from the candidate set is present",
        |args: Vec<Value>| async move {
            let object = want_object("object has exactly one key", &args, 0)?;
            let keys = want_keys("object has exactly one key", &args, 1)?;
            let present = present_keys(&object, &keys);
            match present.len() {
                1 => Ok(format!("Object has exactly one of the keys: '{}'", present[0])),
                0 => Err(RuleFailure::new(format!(
                    "Object has none of the keys {}, expected exactly one",
                    keys.join(", ")
                ))),
                n => Err(RuleFailure::new(format!(
                    "Object has {n} of the keys {}, expected exactly one",
                    keys.join(", ")
                ))),
            }
        },
    )
}

// ── Tests ───────────────────────────────────────────────────────────
