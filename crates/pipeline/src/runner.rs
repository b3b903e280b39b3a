//! Pipeline assembly and orchestration.
//!
//! A [`Pipeline`] owns one source, zero or more actions, and one bundler.
//! Before any side-effecting stage runs, every component's rule lists are
//! evaluated — collect-all by default so one report surfaces every problem,
//! fail-fast when the runner config asks for it.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use grist_core::config::RunnerConfig;
use grist_core::{Batch, Bundle};
use grist_rules::{check_all, check_fail_fast, RuleRef, ValidationReport};

use crate::error::{PipelineError, ValidationFailure};
use crate::traits::{Action, AuthenticatedSource, Bundler, Source};

// ── Component reports ───────────────────────────────────────────────

/// Validation outcome for a single pipeline component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub component: String,
    /// Outcome of the component's configuration rules.
    pub options: ValidationReport,
    /// Outcome of the credential rules, for sources that hold credentials.
    /// Kept separate so credential problems are distinguishable from
    /// configuration problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<ValidationReport>,
}

impl ComponentReport {
    pub fn valid(&self) -> bool {
        self.options.valid && self.credentials.as_ref().is_none_or(|c| c.valid)
    }
}

// ── Source slot ─────────────────────────────────────────────────────

/// Either kind of source. Keeps credential rules reachable without
/// downcasting.
enum SourceSlot {
    Plain(Arc<dyn Source>),
    Authenticated(Arc<dyn AuthenticatedSource>),
}

impl SourceSlot {
    fn name(&self) -> &str {
        match self {
            SourceSlot::Plain(s) => s.name(),
            SourceSlot::Authenticated(s) => s.name(),
        }
    }

    async fn fetch(&self) -> Result<Batch, PipelineError> {
        match self {
            SourceSlot::Plain(s) => s.fetch().await,
            SourceSlot::Authenticated(s) => s.fetch().await,
        }
    }

    fn option_rules(&self) -> Vec<RuleRef> {
        match self {
            SourceSlot::Plain(s) => s.option_rules(),
            SourceSlot::Authenticated(s) => s.option_rules(),
        }
    }

    fn credential_rules(&self) -> Option<Vec<RuleRef>> {
        match self {
            SourceSlot::Plain(_) => None,
            SourceSlot::Authenticated(s) => Some(s.credential_rules()),
        }
    }
}

// ── Builder ─────────────────────────────────────────────────────────

/// Fluent builder for a [`Pipeline`].
pub struct PipelineBuilder {
    name: String,
    config: RunnerConfig,
    source: Option<SourceSlot>,
    actions: Vec<Arc<dyn Action>>,
    bundler: Option<Arc<dyn Bundler>>,
}

impl PipelineBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: RunnerConfig::default(),
            source: None,
            actions: Vec::new(),
            bundler: None,
        }
    }

    pub fn config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source(mut self, source: Arc<dyn Source>) -> Self {
        self.source = Some(SourceSlot::Plain(source));
        self
    }

    /// A source with credentials; its credential rules are validated and
    /// reported independently of its configuration rules.
    pub fn authenticated_source(mut self, source: Arc<dyn AuthenticatedSource>) -> Self {
        self.source = Some(SourceSlot::Authenticated(source));
        self
    }

    /// Append an action; actions run in the order they were added.
    pub fn action(mut self, action: Arc<dyn Action>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn bundler(mut self, bundler: Arc<dyn Bundler>) -> Self {
        self.bundler = Some(bundler);
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let source = self
            .source
            .ok_or_else(|| PipelineError::Incomplete(self.name.clone(), "source"))?;
        let bundler = self
            .bundler
            .ok_or_else(|| PipelineError::Incomplete(self.name.clone(), "bundler"))?;
        Ok(Pipeline {
            name: self.name,
            config: self.config,
            source,
            actions: self.actions,
            bundler,
        })
    }
}

// ── Pipeline ────────────────────────────────────────────────────────

/// One assembled retrieval/transform/bundle chain.
pub struct Pipeline {
    name: String,
    config: RunnerConfig,
    source: SourceSlot,
    actions: Vec<Arc<dyn Action>>,
    bundler: Arc<dyn Bundler>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    pub fn builder(name: impl Into<String>) -> PipelineBuilder {
        PipelineBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every component's rule lists, recomputed from live configuration.
    /// Credential lists appear as their own entry named
    /// `"<source> (credentials)"`.
    fn rule_sets(&self) -> Vec<(String, Vec<RuleRef>)> {
        let mut sets = vec![(self.source.name().to_string(), self.source.option_rules())];
        if let Some(rules) = self.source.credential_rules() {
            sets.push((format!("{} (credentials)", self.source.name()), rules));
        }
        for action in &self.actions {
            sets.push((action.name().to_string(), action.option_rules()));
        }
        sets
    }

    /// Collect-all validation of every component, one report per component.
    pub async fn validate(&self) -> Vec<ComponentReport> {
        let mut reports = Vec::new();

        let options = check_all(&self.source.option_rules()).await;
        let credentials = match self.source.credential_rules() {
            Some(rules) => Some(check_all(&rules).await),
            None => None,
        };
        reports.push(ComponentReport {
            component: self.source.name().to_string(),
            options,
            credentials,
        });

        for action in &self.actions {
            reports.push(ComponentReport {
                component: action.name().to_string(),
                options: check_all(&action.option_rules()).await,
                credentials: None,
            });
        }

        reports
    }

    /// Validate per the configured aggregation policy, collecting failures
    /// into a [`PipelineError::Validation`].
    async fn ensure_valid(&self) -> Result<(), PipelineError> {
        if self.config.fail_fast {
            for (component, rules) in self.rule_sets() {
                if let Err(failure) = check_fail_fast(&rules).await {
                    return Err(PipelineError::Validation {
                        failures: vec![ValidationFailure {
                            component,
                            reason: failure.reason().to_string(),
                        }],
                    });
                }
            }
            return Ok(());
        }

        let mut failures = Vec::new();
        for (component, rules) in self.rule_sets() {
            let report = check_all(&rules).await;
            for outcome in report.failures {
                failures.push(ValidationFailure {
                    component: component.clone(),
                    reason: outcome.detail,
                });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Validation { failures })
        }
    }

    /// Validate, then drive fetch → each transform in order → bundle.
    pub async fn run(&self) -> Result<Bundle, PipelineError> {
        self.ensure_valid().await?;
        info!(pipeline = %self.name, source = self.source.name(), "starting pipeline run");

        let mut batch = self
            .with_stage_timeout("fetch", self.source.fetch())
            .await?;
        info!(source = self.source.name(), records = batch.len(), "fetch complete");

        for action in &self.actions {
            batch = self
                .with_stage_timeout(action.name(), action.transform(batch))
                .await?;
            debug!(action = action.name(), records = batch.len(), "transform complete");
        }

        let bundle = self
            .with_stage_timeout("bundle", self.bundler.bundle(vec![batch]))
            .await?;
        info!(
            pipeline = %self.name,
            bundle = %bundle.id,
            records = bundle.record_count(),
            "pipeline run complete"
        );
        Ok(bundle)
    }

    /// Bound a stage by the configured timeout, if any. The engine defines
    /// no cancellation of its own — this is the orchestrator layering
    /// `tokio::time::timeout` on top.
    async fn with_stage_timeout<T>(
        &self,
        stage: &str,
        fut: impl Future<Output = Result<T, PipelineError>>,
    ) -> Result<T, PipelineError> {
        match self.config.stage_timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(PipelineError::Timeout {
                    stage: stage.to_string(),
                    timeout: limit,
                }),
            },
            None => fut.await,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
