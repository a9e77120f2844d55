//! Atlas Common - orchestration core for the country-info agent.
//!
//! Decomposes a country question into independent single-fact lookups,
//! fans them out against a remote completion backend, and synthesizes the
//! partial results into one sentence with a deterministic fallback path.

pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod resolver;
pub mod subject;

pub use client::{CompletionClient, HttpCompletionClient, ScriptedClient};
pub use config::AtlasConfig;
pub use error::{CompletionError, PipelineError};
pub use pipeline::{FinalAnswer, Pipeline, StructuredSummary, UNAVAILABLE_SENTINEL};
pub use resolver::{ResolverResult, ResolverSpec, ResolverStatus};
pub use subject::Subject;
