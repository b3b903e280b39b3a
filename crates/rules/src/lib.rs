//! Rule-based configuration validation engine.
//!
//! This crate provides:
//! - [`Rule`]: a named, described, asynchronous check producing a success
//!   narrative or a failure reason
//! - Semantic negation that re-uses the original's descriptive text
//! - [`RuleRef`]: a rule paired with the positional arguments it will be
//!   applied with
//! - An evaluator plus collect-all / fail-fast aggregation drivers
//! - The [`contract`] traits pluggable components use to advertise their
//!   configuration preconditions
//! - Built-in predicate libraries over filesystem paths, strings, and
//!   JSON objects

mod args;
pub mod contract;
pub mod evaluate;
pub mod fs;
pub mod object;
pub mod reference;
pub mod report;
pub mod rule;
pub mod string;

pub use contract::{CredentialRules, OptionRules};
pub use evaluate::evaluate;
pub use reference::RuleRef;
pub use report::{check_all, check_fail_fast, RuleOutcome, ValidationReport};
pub use rule::{Rule, RuleFailure, RuleResult};
