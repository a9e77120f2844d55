//! Expert resolvers: a named role bound to a fixed instruction.

use crate::client::CompletionClient;
use crate::prompts;
use tracing::{debug, warn};

/// Immutable resolver definition, created at construction time and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ResolverSpec {
    pub name: String,
    pub instruction: String,
}

impl ResolverSpec {
    pub fn new(name: &str, instruction: &str) -> Self {
        Self {
            name: name.to_string(),
            instruction: instruction.to_string(),
        }
    }
}

/// Outcome of one resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverStatus {
    Ok,
    Failed(String),
}

/// One resolver's answer for one subject. Owned by the run that produced it.
#[derive(Debug, Clone)]
pub struct ResolverResult {
    pub resolver_name: String,
    pub text: String,
    pub status: ResolverStatus,
}

impl ResolverResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, ResolverStatus::Failed(_))
    }
}

/// The three built-in country experts, in declaration order.
pub fn country_resolvers() -> Vec<ResolverSpec> {
    vec![
        ResolverSpec::new("capital", prompts::CAPITAL_INSTRUCTION),
        ResolverSpec::new("language", prompts::LANGUAGE_INSTRUCTION),
        ResolverSpec::new("population", prompts::POPULATION_INSTRUCTION),
    ]
}

/// The synthesizer role. Invoked exactly like an expert, with the serialized
/// summary as its subject.
pub fn synthesizer_spec() -> ResolverSpec {
    ResolverSpec::new("synthesizer", prompts::SYNTHESIZER_INSTRUCTION)
}

/// Run one resolver against one subject. Transport/upstream failures and
/// empty completions become a `Failed` result; they never propagate.
pub async fn resolve(
    client: &dyn CompletionClient,
    spec: &ResolverSpec,
    subject: &str,
) -> ResolverResult {
    match client.complete(&spec.instruction, subject).await {
        Ok(raw) => {
            let text = raw.trim().to_string();
            if text.is_empty() {
                // The instructions mandate terse single-fact answers; an
                // empty completion means the model could not comply.
                warn!("Resolver {} returned empty text", spec.name);
                ResolverResult {
                    resolver_name: spec.name.clone(),
                    text: String::new(),
                    status: ResolverStatus::Failed("empty answer".to_string()),
                }
            } else {
                debug!("Resolver {} answered: {}", spec.name, text);
                ResolverResult {
                    resolver_name: spec.name.clone(),
                    text,
                    status: ResolverStatus::Ok,
                }
            }
        }
        Err(e) => {
            warn!("Resolver {} failed: {}", spec.name, e);
            ResolverResult {
                resolver_name: spec.name.clone(),
                text: String::new(),
                status: ResolverStatus::Failed(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ScriptedClient;
    use crate::error::CompletionError;

    #[tokio::test]
    async fn test_resolve_trims_answer() {
        let client = ScriptedClient::new().on("CAPITAL", Ok("  Islamabad\n".to_string()));
        let spec = ResolverSpec::new("capital", prompts::CAPITAL_INSTRUCTION);

        let result = resolve(&client, &spec, "Pakistan").await;
        assert_eq!(result.text, "Islamabad");
        assert_eq!(result.status, ResolverStatus::Ok);
    }

    #[tokio::test]
    async fn test_resolve_maps_empty_answer_to_failed() {
        let client = ScriptedClient::new().on("CAPITAL", Ok("   \n".to_string()));
        let spec = ResolverSpec::new("capital", prompts::CAPITAL_INSTRUCTION);

        let result = resolve(&client, &spec, "Wakanda").await;
        assert!(result.is_failed());
        assert!(result.text.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_maps_transport_error_to_failed() {
        let client = ScriptedClient::new().on(
            "CAPITAL",
            Err(CompletionError::Transport("connection refused".to_string())),
        );
        let spec = ResolverSpec::new("capital", prompts::CAPITAL_INSTRUCTION);

        let result = resolve(&client, &spec, "Pakistan").await;
        match result.status {
            ResolverStatus::Failed(reason) => assert!(reason.contains("connection refused")),
            ResolverStatus::Ok => panic!("expected failure"),
        }
    }

    #[test]
    fn test_country_resolvers_declaration_order() {
        let specs = country_resolvers();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["capital", "language", "population"]);
    }
}
