//! Filesystem predicates.
//!
//! Each constructor returns a process-wide reusable [`Rule`] whose test
//! reads its path arguments from the rule reference. Checks that touch the
//! disk go through `tokio::fs` and suspend without blocking other
//! evaluations; concurrent evaluations are only as consistent as the
//! filesystem itself.

use std::path::Path;

use serde_json::Value;

use crate::args::want_str;
use crate::rule::{Rule, RuleFailure};

/// The path exists on disk. Args: `[path]`.
pub fn path_exists() -> Rule {
    Rule::new(
        "path exists",
        "the path exists on disk",
        |args: Vec<Value>| async move {
            let path = want_str("path exists", &args, 0)?;
            match tokio::fs::try_exists(&path).await {
                Ok(true) => Ok(format!("Path '{path}' exists")),
                Ok(false) => Err(RuleFailure::new(format!("Path '{path}' does not exist"))),
                Err(e) => Err(RuleFailure::new(format!(
                    "Path '{path}' could not be inspected: {e}"
                ))),
            }
        },
    )
}

/// The path exists and is a regular file. Args: `[path]`.
pub fn path_is_file() -> Rule {
    Rule::new(
        "path is a file",
        "the path exists and is a regular file",
        |args: Vec<Value>| async move {
            let path = want_str("path is a file", &args, 0)?;
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => Ok(format!("Path '{path}' is a file")),
                Ok(_) => Err(RuleFailure::new(format!("Path '{path}' is not a file"))),
                Err(_) => Err(RuleFailure::new(format!("Path '{path}' does not exist"))),
            }
        },
    )
}

/// The path exists and is a directory. Args: `[path]`.
pub fn path_is_directory() -> Rule {
    Rule::new(
        "path is a directory",
        "the path exists and is a directory",
        |args: Vec<Value>| async move {
            let path = want_str("path is a directory", &args, 0)?;
            match tokio::fs::metadata(&path).await {
                Ok(meta) if meta.is_dir() => Ok(format!("Path '{path}' is a directory")),
                Ok(_) => Err(RuleFailure::new(format!("Path '{path}' is not a directory"))),
                Err(_) => Err(RuleFailure::new(format!("Path '{path}' does not exist"))),
            }
        },
    )
}

/// The path is absolute. Lexical check, no disk access. Args: `[path]`.
pub fn path_is_absolute() -> Rule {
    Rule::new(
        "path is absolute",
        "the path is absolute",
        |args: Vec<Value>| async move {
            let path = want_str("path is absolute", &args, 0)?;
            if Path::new(&path).is_absolute() {
                Ok(format!("Path '{path}' is absolute"))
            } else {
                Err(RuleFailure::new(format!("Path '{path}' is not absolute")))
            }
        },
    )
}

/// The path is relative. Lexical check, no disk access. Args: `[path]`.
pub fn path_is_relative() -> Rule {
    Rule::new(
        "path is relative",
        "the path is relative",
        |args: Vec<Value>| async move {
            let path = want_str("path is relative", &args, 0)?;
            if Path::new(&path).is_relative() {
                Ok(format!("Path '{path}' is relative"))
            } else {
                Err(RuleFailure::new(format!("Path '{path}' is not relative")))
            }
        },
    )
}

/// The child path sits strictly below the parent path. Lexical check: a
/// child equal to its parent fails (no relative difference). Args:
/// `[parent, child]`.
pub fn path_is_child_of() -> Rule {
    Rule::new(
        "path is a child of",
        "the second path is strictly below the first",
        |args: Vec<Value>| async move {
            let parent = want_str("path is a child of", &args, 0)?;
            let child = want_str("path is a child of", &args, 1)?;
            match Path::new(&child).strip_prefix(Path::new(&parent)) {
                Ok(rest) if !rest.as_os_str().is_empty() => {
                    Ok(format!("Path '{child}' is a child of '{parent}'"))
                }
                _ => Err(RuleFailure::new(format!(
                    "Path '{child}' is not a child of '{parent}'"
                ))),
            }
        },
    )
}

/// The path is a directory with no entries. Args: `[path]`.
pub fn directory_is_empty() -> Rule {
    Rule::new(
        "directory is empty",
        "the directory contains no entries",
        |args: Vec<Value>| async move {
            let path = want_str("directory is empty", &args, 0)?;
            let mut entries = tokio::fs::read_dir(&path).await.map_err(|e| {
                RuleFailure::new(format!("Directory '{path}' could not be read: {e}"))
            })?;
            match entries.next_entry().await {
                Ok(None) => Ok(format!("Directory '{path}' is empty")),
                Ok(Some(_)) => Err(RuleFailure::new(format!("Directory '{path}' is not empty"))),
                Err(e) => Err(RuleFailure::new(format!(
                    "Directory '{path}' could not be read: {e}"
                ))),
            }
        },
    )
}

// ── Tests ───────────────────────────────────────────────────────────
