//! Error taxonomy for the orchestration pipeline.
//!
//! Per-call failures (`CompletionError`) are caught at the resolver layer
//! and never abort a run; `PipelineError` is the only thing a caller of
//! `Pipeline::run` can see besides a `FinalAnswer`.

/// Failure of a single completion call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// Network/connection-level failure, including request timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend reachable but returned a non-success or unusable response.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Backend returned a payload with no text content.
    #[error("backend returned empty response")]
    EmptyResponse,
}

/// Pipeline-level outcomes that are not a `FinalAnswer`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    /// Subject was empty after normalization; rejected before any call.
    #[error("invalid subject: input is empty")]
    InvalidSubject,

    /// The run was cancelled while calls were in flight.
    #[error("run aborted")]
    Aborted,
}
