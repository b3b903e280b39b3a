//! The configuration validation contract.
//!
//! A pluggable component advertises the rule references that must hold for
//! its configuration (and, separately, for its credentials) before its
//! side-effecting operation runs. The orchestrating caller obtains the
//! lists, evaluates each reference, and decides the aggregation policy
//! ([`crate::check_all`] or [`crate::check_fail_fast`]).

use std::sync::Arc;

use crate::reference::RuleRef;

/// Preconditions a component's current configuration must satisfy.
///
/// The list is recomputed on every call — configuration may be mutable, so
/// nothing is cached here. The default is no preconditions; components
/// with requirements override.
pub trait OptionRules {
    fn option_rules(&self) -> Vec<RuleRef> {
        Vec::new()
    }
}

/// Blanket implementation so `Arc<dyn OptionRules>` can be used directly.
impl<T: OptionRules + ?Sized> OptionRules for Arc<T> {
    fn option_rules(&self) -> Vec<RuleRef> {
        (**self).option_rules()
    }
}

/// A second, independent list of authentication-specific preconditions.
///
/// Kept separate from [`OptionRules`] so credential and configuration
/// concerns can be validated and reported independently.
pub trait CredentialRules: OptionRules {
    fn credential_rules(&self) -> Vec<RuleRef>;
}

impl<T: CredentialRules + ?Sized> CredentialRules for Arc<T> {
    fn credential_rules(&self) -> Vec<RuleRef> {
        (**self).credential_rules()
    }
}
