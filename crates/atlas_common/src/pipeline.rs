//! Orchestration pipeline: fan out the experts, join, synthesize.
//!
//! The top-level contract is "always resolve to text": per-resolver
//! transport/upstream failures degrade the answer, they never surface as
//! errors. The caller only ever sees a `FinalAnswer`, `InvalidSubject`, or
//! `Aborted`.

use crate::client::CompletionClient;
use crate::error::PipelineError;
use crate::prompts;
use crate::resolver::{self, ResolverResult, ResolverSpec};
use crate::subject::Subject;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Marker substituted for a failed expert slot. The synthesizer must see
/// that the slot exists but is empty, not that it was never asked.
pub const UNAVAILABLE_SENTINEL: &str = "<unavailable>";

/// Ordered per-resolver results for one run. Order follows resolver
/// declaration order, not completion order.
#[derive(Debug, Clone)]
pub struct StructuredSummary {
    results: Vec<ResolverResult>,
}

impl StructuredSummary {
    pub fn results(&self) -> &[ResolverResult] {
        &self.results
    }

    pub fn get(&self, name: &str) -> Option<&ResolverResult> {
        self.results.iter().find(|r| r.resolver_name == name)
    }

    pub fn any_failed(&self) -> bool {
        self.results.iter().any(|r| r.is_failed())
    }

    pub fn all_failed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.is_failed())
    }

    /// Flat text block for the synthesizer:
    /// `"capital: Islamabad, language: Urdu, population: 241 million"`,
    /// with the sentinel in place of failed slots.
    pub fn render(&self) -> String {
        self.results
            .iter()
            .map(|r| {
                let value = if r.is_failed() {
                    UNAVAILABLE_SENTINEL
                } else {
                    r.text.as_str()
                };
                format!("{}: {}", r.resolver_name, value)
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The user-facing outcome of a run.
#[derive(Debug, Clone)]
pub struct FinalAnswer {
    pub text: String,
    /// True when any expert failed or the synthesizer had to be bypassed.
    pub degraded: bool,
}

/// Holds the expert resolvers and the synthesizer; stateless across runs.
pub struct Pipeline {
    client: Arc<dyn CompletionClient>,
    resolvers: Vec<ResolverSpec>,
    synthesizer: ResolverSpec,
}

impl Pipeline {
    /// Pipeline with the built-in country resolvers.
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self::with_resolvers(
            client,
            resolver::country_resolvers(),
            resolver::synthesizer_spec(),
        )
    }

    /// Pipeline with an explicit resolver set.
    pub fn with_resolvers(
        client: Arc<dyn CompletionClient>,
        resolvers: Vec<ResolverSpec>,
        synthesizer: ResolverSpec,
    ) -> Self {
        Self {
            client,
            resolvers,
            synthesizer,
        }
    }

    /// Run every expert against `subject`, then synthesize.
    pub async fn run(&self, subject: &Subject) -> Result<FinalAnswer, PipelineError> {
        info!("Running {} resolvers for: {}", self.resolvers.len(), subject);

        let summary = self.fan_out(subject).await?;

        // All experts failed: the fallback decision is an explicit branch
        // here, not prompt text, so it holds even when the backend is down.
        if summary.all_failed() {
            warn!("All resolvers failed for: {}", subject);
            return Ok(FinalAnswer {
                text: prompts::FALLBACK_SENTENCE.to_string(),
                degraded: true,
            });
        }

        let block = summary.render();
        let synthesis = resolver::resolve(self.client.as_ref(), &self.synthesizer, &block).await;

        if synthesis.is_failed() {
            warn!("Synthesizer failed for: {}", subject);
            return Ok(FinalAnswer {
                text: prompts::SYNTHESIS_FAILURE_SENTENCE.to_string(),
                degraded: true,
            });
        }

        Ok(FinalAnswer {
            text: synthesis.text,
            degraded: summary.any_failed(),
        })
    }

    /// Concurrent fan-out over all experts; joins every task before
    /// returning so no result is ever observed partially. A cancelled task
    /// aborts the whole run.
    async fn fan_out(&self, subject: &Subject) -> Result<StructuredSummary, PipelineError> {
        let mut join_set = JoinSet::new();

        for (index, spec) in self.resolvers.iter().enumerate() {
            let client = Arc::clone(&self.client);
            let spec = spec.clone();
            let subject = subject.as_str().to_string();

            join_set.spawn(async move {
                let result = resolver::resolve(client.as_ref(), &spec, &subject).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<ResolverResult>> = vec![None; self.resolvers.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    warn!("Resolver task did not complete: {}", e);
                    return Err(PipelineError::Aborted);
                }
            }
        }

        let results = slots.into_iter().flatten().collect::<Vec<_>>();
        Ok(StructuredSummary { results })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolverStatus;

    fn result(name: &str, status: ResolverStatus, text: &str) -> ResolverResult {
        ResolverResult {
            resolver_name: name.to_string(),
            text: text.to_string(),
            status,
        }
    }

    #[test]
    fn test_render_substitutes_sentinel() {
        let summary = StructuredSummary {
            results: vec![
                result("capital", ResolverStatus::Ok, "Islamabad"),
                result("language", ResolverStatus::Failed("timeout".to_string()), ""),
                result("population", ResolverStatus::Ok, "241 million"),
            ],
        };

        assert_eq!(
            summary.render(),
            "capital: Islamabad, language: <unavailable>, population: 241 million"
        );
        assert!(summary.any_failed());
        assert!(!summary.all_failed());
    }

    #[test]
    fn test_render_preserves_declaration_order() {
        let summary = StructuredSummary {
            results: vec![
                result("capital", ResolverStatus::Ok, "Oslo"),
                result("language", ResolverStatus::Ok, "Norwegian"),
                result("population", ResolverStatus::Ok, "5.5 million"),
            ],
        };

        assert_eq!(
            summary.render(),
            "capital: Oslo, language: Norwegian, population: 5.5 million"
        );
        assert_eq!(summary.get("language").unwrap().text, "Norwegian");
    }

    #[test]
    fn test_all_failed_requires_every_slot() {
        let summary = StructuredSummary {
            results: vec![
                result("capital", ResolverStatus::Failed("down".to_string()), ""),
                result("language", ResolverStatus::Failed("down".to_string()), ""),
            ],
        };
        assert!(summary.all_failed());
    }
}
