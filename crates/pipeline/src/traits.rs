use std::sync::Arc;

use async_trait::async_trait;

use grist_core::{Batch, Bundle};
use grist_rules::{CredentialRules, OptionRules};

use crate::error::PipelineError;

/// Retrieves data from an external system.
///
/// Implementations advertise the preconditions their configuration must
/// satisfy via [`OptionRules`]; the runner evaluates those before `fetch`
/// is allowed to run.
#[async_trait]
pub trait Source: OptionRules + Send + Sync {
    /// Fetch one batch from the underlying system.
    async fn fetch(&self) -> Result<Batch, PipelineError>;

    /// Human-readable name for this source (used in reports and logging).
    fn name(&self) -> &str;
}

/// Blanket implementation so `Arc<dyn Source>` can be used directly.
#[async_trait]
impl<T: Source + ?Sized> Source for Arc<T> {
    async fn fetch(&self) -> Result<Batch, PipelineError> {
        (**self).fetch().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A source that also holds credentials.
///
/// Its [`CredentialRules`] list is validated and reported independently of
/// its configuration rules, so credential problems are distinguishable from
/// configuration problems. The authentication flow itself belongs to the
/// implementation.
pub trait AuthenticatedSource: Source + CredentialRules {}

impl<T: AuthenticatedSource + ?Sized> AuthenticatedSource for Arc<T> {}

/// Reshapes a batch between fetch and bundling.
#[async_trait]
pub trait Action: OptionRules + Send + Sync {
    /// Transform the batch, consuming it.
    async fn transform(&self, batch: Batch) -> Result<Batch, PipelineError>;

    /// Human-readable name for this action (used in reports and logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Action + ?Sized> Action for Arc<T> {
    async fn transform(&self, batch: Batch) -> Result<Batch, PipelineError> {
        (**self).transform(batch).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Packages the surviving batches into a finished bundle.
#[async_trait]
pub trait Bundler: Send + Sync {
    async fn bundle(&self, batches: Vec<Batch>) -> Result<Bundle, PipelineError>;

    /// Human-readable name for this bundler (used in logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Bundler + ?Sized> Bundler for Arc<T> {
    async fn bundle(&self, batches: Vec<Batch>) -> Result<Bundle, PipelineError> {
        (**self).bundle(batches).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
