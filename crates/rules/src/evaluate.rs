//! Evaluation of a single rule reference.

use tracing::debug;

use crate::reference::RuleRef;
use crate::rule::RuleResult;

/// Evaluate one rule reference.
///
/// A bare reference invokes its test with no arguments; a parameterized
/// reference forwards the captured arguments positionally. This is a pure
/// dispatch layer: the rule's own outcome — and its exact message —
/// propagates unchanged, and no new failure kinds are introduced here.
pub async fn evaluate(reference: &RuleRef) -> RuleResult {
    let outcome = match reference {
        RuleRef::Bare(rule) => rule.apply(Vec::new()).await,
        RuleRef::Parameterized(rule, args) => rule.apply(args.clone()).await,
    };

    match &outcome {
        Ok(narrative) => {
            debug!(rule = reference.rule().name(), narrative = %narrative, "rule passed");
        }
        Err(failure) => {
            debug!(rule = reference.rule().name(), reason = %failure, "rule failed");
        }
    }

    outcome
}
