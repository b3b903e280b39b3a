//! The atomic check: a named, described, asynchronous test function.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;
use thiserror::Error;

/// A failed check. Carries the human-readable reason, which is final-form
/// prose meant to be surfaced directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct RuleFailure(pub String);

impl RuleFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Outcome of applying a rule: a success narrative or a failure reason.
/// The `Ok` branch always carries a narrative — an ambiguous empty success
/// is unrepresentable.
pub type RuleResult = Result<String, RuleFailure>;

/// Boxed async test function, invoked with a reference's positional arguments.
pub type TestFn = Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, RuleResult> + Send + Sync>;

/// An atomic, named, described check.
///
/// The test function is the sole pass/fail authority — the rule never
/// reinterprets its outcome. Rules hold no mutable state, are cheap to
/// clone (the test is shared behind an `Arc`), and are safe to evaluate
/// concurrently.
#[derive(Clone)]
pub struct Rule {
    name: String,
    brief: String,
    test: TestFn,
}

impl Rule {
    /// Create a rule from a name, a short description, and an async test
    /// function. No uniqueness or non-emptiness validation is performed —
    /// callers are responsible for meaningful descriptions.
    pub fn new<F, Fut>(name: impl Into<String>, brief: impl Into<String>, test: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RuleResult> + Send + 'static,
    {
        Self {
            name: name.into(),
            brief: brief.into(),
            test: Arc::new(move |args| Box::pin(test(args))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brief(&self) -> &str {
        &self.brief
    }

    /// Invoke the test with the given positional arguments.
    pub async fn apply(&self, args: Vec<Value>) -> RuleResult {
        (self.test)(args).await
    }

    /// Logical complement of this rule, named `"Not <name>"`.
    ///
    /// Always returns a new, independent rule — the original is never
    /// mutated. The original's failure reason becomes the negation's
    /// success narrative and vice versa, so the "why" stays human-readable
    /// without authoring a second description.
    pub fn negate(&self) -> Rule {
        self.negate_named(format!("Not {}", self.name), format!("Not {}", self.brief))
    }

    /// Logical complement with an explicit name and description.
    pub fn negate_named(&self, name: impl Into<String>, brief: impl Into<String>) -> Rule {
        let inner = self.test.clone();
        Rule {
            name: name.into(),
            brief: brief.into(),
            test: Arc::new(move |args| {
                let inner = inner.clone();
                Box::pin(async move {
                    match inner(args).await {
                        Ok(narrative) => Err(RuleFailure(narrative)),
                        Err(failure) => Ok(failure.0),
                    }
                })
            }),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("brief", &self.brief)
            .finish_non_exhaustive()
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn passing() -> Rule {
        Rule::new("always passes", "a check that always passes", |_args| async {
            Ok("All is well".to_string())
        })
    }

    fn failing() -> Rule {
        Rule::new("always fails", "a check that always fails", |_args| async {
            Err(RuleFailure::new("Nothing is well"))
        })
    }

    #[tokio::test]
    async fn apply_forwards_arguments() {
        let rule = Rule::new("echo", "echoes its first argument", |args| async move {
            Ok(format!("Got {}", args[0]))
        });
        let outcome = rule.apply(vec![json!("x")]).await;
        assert_eq!(outcome.unwrap(), "Got \"x\"");
    }

    #[tokio::test]
    async fn negate_swaps_failure_into_narrative() {
        let negated = failing().negate();
        let outcome = negated.apply(Vec::new()).await;
        assert_eq!(outcome.unwrap(), "Nothing is well");
    }

    #[tokio::test]
    async fn negate_swaps_narrative_into_reason() {
        let negated = passing().negate();
        let outcome = negated.apply(Vec::new()).await;
        assert_eq!(outcome.unwrap_err().reason(), "All is well");
    }

    #[tokio::test]
    async fn negate_defaults_name_and_brief() {
        let negated = passing().negate();
        assert_eq!(negated.name(), "Not always passes");
        assert_eq!(negated.brief(), "Not a check that always passes");
    }

    #[tokio::test]
    async fn negate_named_overrides_text() {
        let negated = passing().negate_named("never passes", "the opposite check");
        assert_eq!(negated.name(), "never passes");
        assert_eq!(negated.brief(), "the opposite check");
    }

    #[tokio::test]
    async fn negate_leaves_original_untouched() {
        let original = passing();
        let _negated = original.negate();
        // The original must keep its own name and outcome.
        assert_eq!(original.name(), "always passes");
        assert_eq!(original.apply(Vec::new()).await.unwrap(), "All is well");
    }

    #[tokio::test]
    async fn double_negation_restores_outcome() {
        let twice = passing().negate().negate();
        assert_eq!(twice.apply(Vec::new()).await.unwrap(), "All is well");

        let twice = failing().negate().negate();
        assert_eq!(
            twice.apply(Vec::new()).await.unwrap_err().reason(),
            "Nothing is well"
        );
        // Outcome round-trips; the default name does not.
        assert_eq!(twice.name(), "Not Not always fails");
    }

    #[test]
    fn debug_shows_name_and_brief() {
        let printed = format!("{:?}", passing());
        assert!(printed.contains("always passes"));
    }
}
