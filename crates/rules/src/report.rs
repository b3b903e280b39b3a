//! Aggregation drivers layered on top of per-reference evaluation.
//!
//! The evaluator itself is policy-agnostic; these are the two standard
//! strategies callers drive it with. Both evaluate sequentially in list
//! order so reports are deterministic.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::evaluate::evaluate;
use crate::reference::RuleRef;
use crate::rule::RuleFailure;

/// One evaluated rule with its narrative or reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// The rule's name.
    pub rule: String,
    /// Success narrative or failure reason, verbatim.
    pub detail: String,
}

/// Collected outcome of evaluating a list of rule references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub passes: Vec<RuleOutcome>,
    pub failures: Vec<RuleOutcome>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            valid: true,
            passes: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn pass(&mut self, rule: impl Into<String>, narrative: impl Into<String>) {
        self.passes.push(RuleOutcome {
            rule: rule.into(),
            detail: narrative.into(),
        });
    }

    fn fail(&mut self, rule: impl Into<String>, reason: impl Into<String>) {
        self.valid = false;
        self.failures.push(RuleOutcome {
            rule: rule.into(),
            detail: reason.into(),
        });
    }
}

/// Collect-all: evaluate every reference and record every outcome.
pub async fn check_all(references: &[RuleRef]) -> ValidationReport {
    let mut report = ValidationReport::new();

    for reference in references {
        let name = reference.rule().name().to_string();
        match evaluate(reference).await {
            Ok(narrative) => report.pass(name, narrative),
            Err(failure) => report.fail(name, failure.reason()),
        }
    }

    debug!(
        passed = report.passes.len(),
        failed = report.failures.len(),
        "collect-all evaluation finished"
    );
    report
}

/// Fail-fast: stop at the first failing reference, propagating its reason
/// unchanged. Later references are not evaluated.
pub async fn check_fail_fast(references: &[RuleRef]) -> Result<(), RuleFailure> {
    for reference in references {
        evaluate(reference).await?;
    }
    Ok(())
}
