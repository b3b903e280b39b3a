//! Rule references: a rule plus the arguments it will be applied with.

use serde_json::Value;

use crate::rule::Rule;

/// A reference to a rule, ready for evaluation.
///
/// The two shapes are explicit variants so dispatch is exhaustive and a
/// malformed reference (anything other than a rule in head position) is
/// unrepresentable.
#[derive(Debug, Clone)]
pub enum RuleRef {
    /// A zero-argument structural check.
    Bare(Rule),
    /// A check applied to captured positional arguments.
    Parameterized(Rule, Vec<Value>),
}

impl RuleRef {
    pub fn bare(rule: Rule) -> Self {
        RuleRef::Bare(rule)
    }

    pub fn with_args(rule: Rule, args: Vec<Value>) -> Self {
        RuleRef::Parameterized(rule, args)
    }

    /// The underlying rule, for introspection. Never invokes its test.
    pub fn rule(&self) -> &Rule {
        match self {
            RuleRef::Bare(rule) => rule,
            RuleRef::Parameterized(rule, _) => rule,
        }
    }

    /// The captured arguments (empty for a bare reference).
    pub fn args(&self) -> &[Value] {
        match self {
            RuleRef::Bare(_) => &[],
            RuleRef::Parameterized(_, args) => args,
        }
    }
}

impl From<Rule> for RuleRef {
    fn from(rule: Rule) -> Self {
        RuleRef::Bare(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    #[test]
    fn rule_extraction_never_invokes_test() {
        let invocations = Arc::new(AtomicU32::new(0));
        let counter = invocations.clone();
        let rule = Rule::new("counting", "counts invocations", move |_args| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok("Counted".to_string())
            }
        });

        let bare = RuleRef::bare(rule.clone());
        assert_eq!(bare.rule().name(), "counting");

        let parameterized = RuleRef::with_args(rule, vec![json!(1), json!(2)]);
        assert_eq!(parameterized.rule().name(), "counting");
        assert_eq!(parameterized.args(), &[json!(1), json!(2)]);

        assert_eq!(invocations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn bare_reference_has_no_args() {
        let rule = Rule::new("noop", "does nothing", |_args| async {
            Ok("Nothing happened".to_string())
        });
        let reference: RuleRef = rule.into();
        assert!(reference.args().is_empty());
    }
}
