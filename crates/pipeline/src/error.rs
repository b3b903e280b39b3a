use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// One rule that did not hold during pre-run validation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailure {
    /// The component (credential lists are reported as
    /// `"<name> (credentials)"`).
    pub component: String,
    /// The failing rule's reason, verbatim.
    pub reason: String,
}

/// Errors that can occur while building or running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {} rule(s) did not hold", .failures.len())]
    Validation { failures: Vec<ValidationFailure> },

    #[error("pipeline '{0}' is missing a {1}")]
    Incomplete(String, &'static str),

    #[error("source '{source_name}' fetch failed: {reason}")]
    Fetch { source_name: String, reason: String },

    #[error("action '{action}' transform failed: {reason}")]
    Transform { action: String, reason: String },

    #[error("bundler '{bundler}' failed: {reason}")]
    Bundle { bundler: String, reason: String },

    #[error("stage '{stage}' timed out after {timeout:?}")]
    Timeout { stage: String, timeout: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
