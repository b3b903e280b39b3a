//! Pluggable retrieval/transform/bundle pipeline.
//!
//! Concrete I/O lives behind the [`Source`], [`Action`], and [`Bundler`]
//! traits. The [`runner::Pipeline`] validates every component's
//! configuration through the rule engine before any side-effecting stage
//! runs.

pub mod error;
pub mod runner;
pub mod traits;

pub use error::{PipelineError, ValidationFailure};
pub use runner::{ComponentReport, Pipeline, PipelineBuilder};
pub use traits::{Action, AuthenticatedSource, Bundler, Source};
